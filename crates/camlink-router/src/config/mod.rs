//! Router config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use camlink_core::error::{CamlinkError, Result};

pub use schema::{DecoderSection, LogSection, RouterConfig};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "CAMLINK_CONFIG";
pub const DEFAULT_PATH: &str = "camlink.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<RouterConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        CamlinkError::BadConfig(format!("read {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RouterConfig> {
    let cfg: RouterConfig = serde_yaml::from_str(s)
        .map_err(|e| CamlinkError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `$CAMLINK_CONFIG` (or `camlink.yaml`); fall back to defaults when
/// the file does not exist.
pub fn load_default() -> Result<RouterConfig> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_PATH.to_owned());
    if Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        tracing::debug!(%path, "no config file, using defaults");
        Ok(RouterConfig::default())
    }
}

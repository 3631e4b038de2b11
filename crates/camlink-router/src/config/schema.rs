use serde::Deserialize;

use camlink_core::error::{CamlinkError, Result};
use camlink_core::protocol::Decoder;

const MAX_PAYLOAD_CEILING: usize = 16 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    pub version: u32,

    #[serde(default)]
    pub decoder: DecoderSection,

    #[serde(default)]
    pub log: LogSection,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            decoder: DecoderSection::default(),
            log: LogSection::default(),
        }
    }
}

impl RouterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CamlinkError::UnsupportedVersion);
        }
        self.decoder.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoderSection {
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,

    #[serde(default)]
    pub deny_unknown_fields: bool,
}

impl Default for DecoderSection {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
            deny_unknown_fields: false,
        }
    }
}

impl DecoderSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PAYLOAD_CEILING).contains(&self.max_payload_bytes) {
            return Err(CamlinkError::BadConfig(format!(
                "decoder.max_payload_bytes must be between 1 and {MAX_PAYLOAD_CEILING}"
            )));
        }
        Ok(())
    }

    /// Decoder configured from this section.
    pub fn decoder(&self) -> Decoder {
        Decoder::new()
            .max_payload_bytes(self.max_payload_bytes)
            .deny_unknown_fields(self.deny_unknown_fields)
    }
}

fn default_max_payload_bytes() -> usize {
    64 * 1024
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl LogSection {
    pub fn validate(&self) -> Result<()> {
        if self.filter.trim().is_empty() {
            return Err(CamlinkError::BadConfig("log.filter must not be empty".into()));
        }
        Ok(())
    }
}

fn default_filter() -> String {
    "info".into()
}

//! camlink router (debug host)
//!
//! Reads newline-delimited JSON events from stdin, decodes each line, and
//! routes it through the dispatcher (the built-in handler logs it).
//! - Config: `$CAMLINK_CONFIG` or `camlink.yaml`, defaults if absent
//! - Log filter: `RUST_LOG`, else `log.filter` from config

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use camlink_router::{app_state::AppState, config, dispatch::Outcome};

#[tokio::main]
async fn main() {
    let cfg = config::load_default().expect("config load failed");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log.filter.as_str()));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let state = AppState::new(cfg);
    let dispatcher = state.dispatcher();
    tracing::info!(
        handlers = dispatcher.subscribed_ids().len(),
        max_payload_bytes = state.cfg().decoder.max_payload_bytes,
        "camlink-router reading stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut lineno = 0u64;
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        };
        lineno += 1;
        if line.trim().is_empty() {
            continue;
        }

        match dispatcher.dispatch_raw(&line).await {
            Ok(Outcome::Delivered(_)) => {}
            Ok(Outcome::Unrecognized(event_id)) => {
                tracing::debug!(line = lineno, %event_id, "unrecognized event dropped");
            }
            Err(e) => {
                tracing::warn!(line = lineno, code = e.code().as_str(), error = %e, "decode failed");
            }
        }
    }

    tracing::debug!("metrics:\n{}", dispatcher.metrics().render());
    tracing::info!(lines = lineno, "stdin closed, exiting");
}

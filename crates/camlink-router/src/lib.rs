//! camlink router library entry.
//!
//! Hosts decoded camera events in-process: strict YAML config, a
//! discriminator-keyed router with async handlers, decode counters, and the
//! built-in logging handler. The `camlink-router` binary feeds it
//! newline-delimited JSON for debugging controllers and remotes.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod services;

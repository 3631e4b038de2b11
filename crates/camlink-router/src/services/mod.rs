//! Built-in event handlers.

pub mod log;

pub use log::LogHandler;

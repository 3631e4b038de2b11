//! Dispatcher module exports.

pub mod dispatcher;

pub use dispatcher::{Dispatcher, EventHandler, Outcome, UNRECOGNIZED_LABEL};

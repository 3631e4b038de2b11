//! camlink core: the camera-control event catalog and its JSON codec.
//!
//! This crate defines the wire-level contract shared by the camera controller,
//! remote UIs, and any tooling that needs to speak to them. It carries no
//! transport or runtime dependencies so it can be embedded anywhere.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every fallible path surfaces as `CamlinkError`/`Result`, so a controller
//! never crashes on a malformed or unexpected payload.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{CamlinkError, ErrorCode, Result};
pub use protocol::{decode, encode, Decoded, Decoder, Event, EventShape};

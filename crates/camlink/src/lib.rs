//! Top-level facade crate for camlink.
//!
//! Re-exports the event catalog/codec and the router library so users can
//! depend on a single crate.

pub mod core {
    pub use camlink_core::*;
}

pub mod router {
    pub use camlink_router::*;
}

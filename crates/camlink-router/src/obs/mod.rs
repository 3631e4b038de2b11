//! Lightweight in-process metrics (dependency-free).
//!
//! Counters and a latency histogram stored as atomics and rendered in the
//! Prometheus text format.

pub mod metrics;

pub use metrics::RouterMetrics;

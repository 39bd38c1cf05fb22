//! Orchestrator - full alert passes
//!
//! See `engine.rs` for the pass itself and `snapshot.rs` for persisting
//! and fingerprinting its output.

pub mod engine;
pub mod snapshot;

// Re-export main types for convenience
pub use engine::{AlertEngine, AlertReport, StatusUpdate};
pub use snapshot::{fingerprint, ReportSnapshot, SnapshotError};

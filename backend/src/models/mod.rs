//! Domain models for the alert engine

pub mod alert;
pub mod event;
pub mod policy;

// Re-exports
pub use alert::{Alert, AlertKind, AlertSource, BucketCategory, Severity};
pub use event::{EngineEvent, EngineLog, SkipReason};
pub use policy::{PaymentFrequency, PolicyRecord, PolicyStatus};

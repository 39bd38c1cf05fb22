//! Policy Alerts Core - payment and renewal alert engine
//!
//! Classifies insurance policies by payment status and produces urgency
//! bucketed payment and renewal alerts, plus summary statistics.
//!
//! # Architecture
//!
//! - **core**: Calendar parsing and day arithmetic
//! - **models**: Domain types (PolicyRecord, Alert, EngineLog)
//! - **classifier**: Payment Status Classifier and derived policy status
//! - **alerts**: Alert Generator (bucket tables, ordering, deduplication)
//! - **stats**: Statistics Aggregator
//! - **orchestrator**: Configured engine passes and report snapshots
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents)
//! 2. No clock reads: "today" is always an argument
//! 3. Passes never fail; bad records only lose the alert that needs the bad field
//! 4. At most one payment alert and one renewal alert per policy id

// Module declarations
pub mod alerts;
pub mod classifier;
pub mod config;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod stats;

// Re-exports for convenience
pub use alerts::{
    generate_alerts, generate_alerts_logged, generate_alerts_with, sort_alerts,
    without_acknowledged,
};
pub use classifier::{classify, classify_with, derive_status, PaymentClassification, PaymentState};
pub use config::{AlertConfig, ConfigError};
pub use crate::core::calendar::{days_between, parse_date, parse_date_strict, CalendarError};
pub use models::{
    alert::{Alert, AlertKind, AlertSource, BucketCategory, Severity},
    event::{EngineEvent, EngineLog, SkipReason},
    policy::{PaymentFrequency, PolicyRecord, PolicyStatus},
};
pub use orchestrator::{AlertEngine, AlertReport, ReportSnapshot, SnapshotError, StatusUpdate};
pub use stats::{aggregate, Statistics};

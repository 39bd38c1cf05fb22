//! Alert Generator
//!
//! - `buckets`: the bucket, severity and kind tables
//! - `generator`: the per-pass rules, deduplication and ordering

pub mod buckets;
pub mod generator;

pub use generator::{generate_alerts, generate_alerts_logged, generate_alerts_with, sort_alerts};

use std::collections::HashSet;

use crate::models::alert::Alert;

/// Drop alerts the user already acknowledged
///
/// Persistent alerts (7_days and overdue buckets) are kept regardless: they
/// only disappear once the underlying payment or renewal is resolved.
pub fn without_acknowledged<'a, I>(alerts: Vec<Alert>, acknowledged: I) -> Vec<Alert>
where
    I: IntoIterator<Item = &'a str>,
{
    let acknowledged: HashSet<&str> = acknowledged.into_iter().collect();
    alerts
        .into_iter()
        .filter(|alert| alert.is_persistent || !acknowledged.contains(alert.id.as_str()))
        .collect()
}

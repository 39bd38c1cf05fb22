//! Statistics Aggregator
//!
//! Folds an alert list into the counters the UI shows as badges. Maps are
//! ordered so serialized statistics are stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::alert::{Alert, AlertKind, BucketCategory, Severity};

/// Summary counters over one alert list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_bucket: BTreeMap<BucketCategory, usize>,
    pub by_kind: BTreeMap<AlertKind, usize>,
    pub persistent_count: usize,
    /// Sum of policy amounts over overdue alerts (i64 cents, negatives count as zero)
    pub overdue_amount: i64,
}

impl Statistics {
    pub fn severity_count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }

    pub fn bucket_count(&self, bucket: BucketCategory) -> usize {
        self.by_bucket.get(&bucket).copied().unwrap_or(0)
    }

    pub fn kind_count(&self, kind: AlertKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Fold alerts into statistics
///
/// # Example
/// ```
/// use policy_alerts_core::{aggregate, Statistics};
///
/// assert_eq!(aggregate(&[]), Statistics::default());
/// ```
pub fn aggregate(alerts: &[Alert]) -> Statistics {
    alerts.iter().fold(Statistics::default(), |mut stats, alert| {
        stats.total += 1;
        *stats.by_severity.entry(alert.severity).or_insert(0) += 1;
        *stats.by_bucket.entry(alert.bucket_category).or_insert(0) += 1;
        *stats.by_kind.entry(alert.kind).or_insert(0) += 1;
        if alert.is_persistent {
            stats.persistent_count += 1;
        }
        if alert.is_overdue() {
            stats.overdue_amount = stats.overdue_amount.saturating_add(alert.amount.max(0));
        }
        stats
    })
}

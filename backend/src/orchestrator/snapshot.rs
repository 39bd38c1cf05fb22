//! Report snapshots
//!
//! Serializes an `AlertReport` together with a SHA-256 fingerprint over its
//! date, alerts and statistics. A host that re-runs the engine on every
//! refresh can compare fingerprints to tell whether anything visible
//! changed, and a stored snapshot can be checked for tampering or
//! truncation on load.
//!
//! # Critical Invariants
//!
//! - **Determinism**: the same report always hashes to the same fingerprint
//! - **Integrity**: a snapshot only loads if every field matches its fingerprint

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::alert::Alert;
use crate::orchestrator::engine::AlertReport;
use crate::stats::Statistics;

#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),

    #[error("Fingerprint mismatch: expected {expected}, computed {actual}")]
    FingerprintMismatch { expected: String, actual: String },
}

/// Serializable form of one engine pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub today: NaiveDate,
    pub alerts: Vec<Alert>,
    pub statistics: Statistics,
    /// Hex SHA-256 of the serialized date, alerts and statistics
    pub fingerprint: String,
}

/// Fields covered by the fingerprint, in hashing order
#[derive(Serialize)]
struct Fingerprinted<'a> {
    today: &'a NaiveDate,
    alerts: &'a [Alert],
    statistics: &'a Statistics,
}

impl ReportSnapshot {
    pub fn from_report(report: &AlertReport) -> Result<Self, SnapshotError> {
        Ok(Self {
            today: report.today,
            alerts: report.alerts.clone(),
            statistics: report.statistics.clone(),
            fingerprint: fingerprint(report)?,
        })
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Parse a snapshot and verify its fingerprint
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: ReportSnapshot =
            serde_json::from_str(json).map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        let actual = digest(&Fingerprinted {
            today: &snapshot.today,
            alerts: &snapshot.alerts,
            statistics: &snapshot.statistics,
        })?;
        if actual != snapshot.fingerprint {
            return Err(SnapshotError::FingerprintMismatch {
                expected: snapshot.fingerprint,
                actual,
            });
        }
        Ok(snapshot)
    }

    pub fn into_report(self) -> AlertReport {
        AlertReport {
            today: self.today,
            alerts: self.alerts,
            statistics: self.statistics,
        }
    }
}

/// Hex SHA-256 over the JSON encoding of the report
///
/// Order-sensitive: the same alerts in a different order produce a
/// different fingerprint.
pub fn fingerprint(report: &AlertReport) -> Result<String, SnapshotError> {
    digest(&Fingerprinted {
        today: &report.today,
        alerts: &report.alerts,
        statistics: &report.statistics,
    })
}

fn digest(fields: &Fingerprinted<'_>) -> Result<String, SnapshotError> {
    let json = serde_json::to_vec(fields).map_err(|e| {
        SnapshotError::Serialization(format!("Report serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::policy::PolicyRecord;
    use crate::orchestrator::engine::AlertEngine;

    fn report() -> AlertReport {
        let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let policies = vec![
            PolicyRecord::new("p-1", "POL-1", "Holder").with_last_payment_date("2024-05-22"),
            PolicyRecord::new("p-2", "POL-2", "Holder").with_last_payment_date("2024-04-01"),
        ];
        AlertEngine::default().run(&policies, today)
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let a = report();
        let b = report();
        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
        assert_eq!(fingerprint(&a).unwrap().len(), 64);
    }

    #[test]
    fn test_fingerprint_is_order_sensitive() {
        let mut report = report();
        let before = fingerprint(&report).unwrap();
        report.alerts.reverse();
        assert_ne!(before, fingerprint(&report).unwrap());
    }

    #[test]
    fn test_json_round_trip_verifies() {
        let original = report();
        let json = ReportSnapshot::from_report(&original).unwrap().to_json().unwrap();
        let restored = ReportSnapshot::from_json(&json).unwrap().into_report();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_tampered_snapshot_rejected() {
        let mut snapshot = ReportSnapshot::from_report(&report()).unwrap();
        snapshot.alerts.pop();
        let json = snapshot.to_json().unwrap();

        assert!(matches!(
            ReportSnapshot::from_json(&json),
            Err(SnapshotError::FingerprintMismatch { .. })
        ));
    }

    #[test]
    fn test_edited_statistics_or_date_rejected() {
        let original = ReportSnapshot::from_report(&report()).unwrap();

        let mut stats_edit = original.clone();
        stats_edit.statistics.total += 1;
        assert!(matches!(
            ReportSnapshot::from_json(&stats_edit.to_json().unwrap()),
            Err(SnapshotError::FingerprintMismatch { .. })
        ));

        let mut date_edit = original;
        date_edit.today = date_edit.today.succ_opt().unwrap();
        assert!(matches!(
            ReportSnapshot::from_json(&date_edit.to_json().unwrap()),
            Err(SnapshotError::FingerprintMismatch { .. })
        ));
    }
}

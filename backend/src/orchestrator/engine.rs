//! Alert engine
//!
//! Runs one full pass over a policy snapshot:
//!
//! ```text
//! policies + today
//!   → Classifier   (next due date, payment state)
//!   → Generator    (bucketed, sorted, deduplicated alerts)
//!   → Aggregator   (badge counters)
//!   → AlertReport
//! ```
//!
//! The engine holds only its validated configuration. Nothing carries over
//! between passes, so one engine can serve any number of callers and
//! snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::alerts::{generate_alerts_logged, generate_alerts_with};
use crate::classifier::{classify_with, derive_status, PaymentClassification};
use crate::config::{AlertConfig, ConfigError};
use crate::models::alert::Alert;
use crate::models::event::EngineLog;
use crate::models::policy::{PolicyRecord, PolicyStatus};
use crate::stats::{aggregate, Statistics};

/// Output of one engine pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertReport {
    pub today: NaiveDate,
    pub alerts: Vec<Alert>,
    pub statistics: Statistics,
}

impl AlertReport {
    /// Alerts that must stay visible until resolved
    pub fn persistent_alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| a.is_persistent)
    }

    pub fn alerts_for_policy<'a>(&'a self, policy_id: &'a str) -> impl Iterator<Item = &'a Alert> {
        self.alerts.iter().filter(move |a| a.policy_id == policy_id)
    }
}

/// Current versus derived status of one policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub policy_id: String,
    pub policy_number: String,
    pub current: PolicyStatus,
    pub derived: PolicyStatus,
}

impl StatusUpdate {
    pub fn is_changed(&self) -> bool {
        self.current != self.derived
    }
}

/// Configured entry point for alert passes
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use policy_alerts_core::{AlertConfig, AlertEngine, PolicyRecord};
///
/// let engine = AlertEngine::new(AlertConfig::default()).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
/// let policies = vec![
///     PolicyRecord::new("p-1", "POL-1", "Ana Ruiz").with_last_payment_date("2024-05-22"),
/// ];
///
/// let report = engine.run(&policies, today);
/// assert_eq!(report.statistics.total, 1);
/// assert_eq!(report.persistent_alerts().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AlertEngine {
    config: AlertConfig,
}

impl AlertEngine {
    /// Create an engine after validating `config`
    pub fn new(config: AlertConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    pub fn classify(&self, policy: &PolicyRecord, today: NaiveDate) -> PaymentClassification {
        classify_with(policy, today, &self.config)
    }

    pub fn derive_status(&self, policy: &PolicyRecord, today: NaiveDate) -> PolicyStatus {
        derive_status(policy, today, &self.config)
    }

    /// Derived status for every policy, in input order
    pub fn status_updates(&self, policies: &[PolicyRecord], today: NaiveDate) -> Vec<StatusUpdate> {
        policies
            .iter()
            .map(|policy| StatusUpdate {
                policy_id: policy.id.clone(),
                policy_number: policy.policy_number.clone(),
                current: policy.status,
                derived: self.derive_status(policy, today),
            })
            .collect()
    }

    pub fn generate(&self, policies: &[PolicyRecord], today: NaiveDate) -> Vec<Alert> {
        generate_alerts_with(policies, today, &self.config)
    }

    /// Run a full pass
    pub fn run(&self, policies: &[PolicyRecord], today: NaiveDate) -> AlertReport {
        Self::report(today, self.generate(policies, today))
    }

    /// Run a full pass, recording engine events into `log`
    pub fn run_logged(
        &self,
        policies: &[PolicyRecord],
        today: NaiveDate,
        log: &mut EngineLog,
    ) -> AlertReport {
        let alerts = generate_alerts_logged(policies, today, &self.config, log);
        Self::report(today, alerts)
    }

    fn report(today: NaiveDate, alerts: Vec<Alert>) -> AlertReport {
        let statistics = aggregate(&alerts);
        AlertReport {
            today,
            alerts,
            statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AlertConfig {
            renewal_horizon_days: 60,
            ..AlertConfig::default()
        };
        assert!(AlertEngine::new(config).is_err());
    }

    #[test]
    fn test_status_updates_flag_changes() {
        let engine = AlertEngine::default();
        let policies = vec![
            PolicyRecord::new("p-1", "POL-1", "Holder").with_last_payment_date("2024-04-01"),
            PolicyRecord::new("p-2", "POL-2", "Holder").with_last_payment_date("2024-06-15"),
        ];

        let updates = engine.status_updates(&policies, today());
        assert_eq!(updates.len(), 2);
        assert!(updates[0].is_changed());
        assert_eq!(updates[0].derived, PolicyStatus::OverdueCritical);
        assert!(!updates[1].is_changed());
    }

    #[test]
    fn test_run_logged_matches_run() {
        let engine = AlertEngine::default();
        let policies = vec![
            PolicyRecord::new("p-1", "POL-1", "Holder")
                .with_last_payment_date("2024-05-22")
                .with_expiration_date("2024-06-10"),
        ];
        let mut log = EngineLog::new();

        let plain = engine.run(&policies, today());
        let logged = engine.run_logged(&policies, today(), &mut log);

        assert_eq!(plain, logged);
        assert_eq!(log.events_of_type("AlertEmitted").len(), 2);
        assert_eq!(logged.alerts_for_policy("p-1").count(), 2);
    }
}

//! Payment Status Classifier
//!
//! Computes a policy's next payment due date and a discrete payment state
//! from its last payment date and payment frequency.
//!
//! # Rules
//!
//! `next_due_date = last_payment_date + frequency interval`, then on
//! `days_until_due` (first match wins):
//!
//! 1. more than 7 days late → `OverdueCritical`
//! 2. 1 to 7 days late → `Overdue`
//! 3. due within 7 days → `DueSoon`
//! 4. otherwise → `Current`
//!
//! A policy without a usable last payment date is `Unknown` and never
//! alerted on. Classification is pure: it reads the policy and `today` and
//! nothing else.

pub mod status;

pub use status::derive_status;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AlertConfig;
use crate::core::calendar::{add_days, days_between};
use crate::models::policy::PolicyRecord;

/// Days ahead of the due date at which a payment counts as due soon
pub const DUE_SOON_DAYS: i64 = 7;

/// Discrete payment state of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    /// No usable last payment date
    Unknown,
    Current,
    DueSoon,
    /// Late, but not yet late enough to demote the policy status
    Overdue,
    OverdueCritical,
}

/// Result of classifying one policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentClassification {
    pub next_due_date: Option<NaiveDate>,
    pub days_until_due: Option<i64>,
    pub state: PaymentState,
}

impl PaymentClassification {
    fn unknown() -> Self {
        Self {
            next_due_date: None,
            days_until_due: None,
            state: PaymentState::Unknown,
        }
    }
}

/// Classify a policy with the default thresholds
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use policy_alerts_core::{classify, PaymentState, PolicyRecord};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
/// let policy = PolicyRecord::new("p-1", "POL-1", "Ana Ruiz")
///     .with_last_payment_date("2024-05-22");
///
/// let result = classify(&policy, today);
/// assert_eq!(result.next_due_date, NaiveDate::from_ymd_opt(2024, 6, 21));
/// assert_eq!(result.days_until_due, Some(1));
/// assert_eq!(result.state, PaymentState::DueSoon);
/// ```
pub fn classify(policy: &PolicyRecord, today: NaiveDate) -> PaymentClassification {
    classify_with(policy, today, &AlertConfig::default())
}

/// Classify a policy using the escalation threshold from `config`
pub fn classify_with(
    policy: &PolicyRecord,
    today: NaiveDate,
    config: &AlertConfig,
) -> PaymentClassification {
    let Some(last_payment) = policy.last_payment() else {
        return PaymentClassification::unknown();
    };
    let Some(next_due) = add_days(last_payment, policy.payment_frequency.interval_days()) else {
        return PaymentClassification::unknown();
    };

    let days_until_due = days_between(today, next_due);

    PaymentClassification {
        next_due_date: Some(next_due),
        days_until_due: Some(days_until_due),
        state: payment_state(days_until_due, config),
    }
}

/// Map a signed day distance to a payment state
pub fn payment_state(days_until_due: i64, config: &AlertConfig) -> PaymentState {
    if config.is_critically_overdue(days_until_due) {
        PaymentState::OverdueCritical
    } else if days_until_due < 0 {
        PaymentState::Overdue
    } else if days_until_due <= DUE_SOON_DAYS {
        PaymentState::DueSoon
    } else {
        PaymentState::Current
    }
}

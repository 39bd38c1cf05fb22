//! Derived policy status
//!
//! Decides which lifecycle status a policy should display after a pass.
//! A short payment delay (1 to 7 days) never demotes a policy; only a
//! critical delay, an expired term, or an upcoming renewal change it.

use chrono::NaiveDate;

use super::{classify_with, PaymentState};
use crate::config::AlertConfig;
use crate::core::calendar::days_between;
use crate::models::policy::{PolicyRecord, PolicyStatus};

/// Status the policy should carry as of `today`
///
/// Rules, first match wins:
/// - `Cancelled` is terminal and returned unchanged
/// - critically overdue payment → `OverdueCritical`
/// - expiration date in the past → `Expired`
/// - expiration within the renewal horizon → `PendingRenewal`
/// - a status this engine set earlier whose condition has cleared → `Active`
/// - otherwise the input status is kept
pub fn derive_status(policy: &PolicyRecord, today: NaiveDate, config: &AlertConfig) -> PolicyStatus {
    if policy.status == PolicyStatus::Cancelled {
        return PolicyStatus::Cancelled;
    }

    if classify_with(policy, today, config).state == PaymentState::OverdueCritical {
        return PolicyStatus::OverdueCritical;
    }

    if let Some(expiration) = policy.expiration() {
        let days_to_expiry = days_between(today, expiration);
        if days_to_expiry < 0 {
            return PolicyStatus::Expired;
        }
        if days_to_expiry <= config.renewal_horizon_days {
            return PolicyStatus::PendingRenewal;
        }
    }

    match policy.status {
        PolicyStatus::OverdueCritical | PolicyStatus::PendingRenewal => PolicyStatus::Active,
        other => other,
    }
}

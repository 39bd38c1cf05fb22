//! Alert model
//!
//! An `Alert` is the engine's output for one policy and one alert source
//! (payment or renewal). Alerts are ephemeral: every pass rebuilds them from
//! scratch, and only the derived `id` is stable across passes so the UI can
//! remember which ones were acknowledged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which date an alert is keyed off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSource {
    /// Next premium payment (last payment + frequency interval)
    Payment,
    /// Policy expiration date
    Renewal,
}

impl AlertSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSource::Payment => "payment",
            AlertSource::Renewal => "renewal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PaymentDue,
    PaymentOverdue,
    PaymentOverdueCritical,
    RenewalUpcoming,
    RenewalOverdue,
}

impl AlertKind {
    pub fn source(&self) -> AlertSource {
        match self {
            AlertKind::PaymentDue | AlertKind::PaymentOverdue | AlertKind::PaymentOverdueCritical => {
                AlertSource::Payment
            }
            AlertKind::RenewalUpcoming | AlertKind::RenewalOverdue => AlertSource::Renewal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::PaymentDue => "payment_due",
            AlertKind::PaymentOverdue => "payment_overdue",
            AlertKind::PaymentOverdueCritical => "payment_overdue_critical",
            AlertKind::RenewalUpcoming => "renewal_upcoming",
            AlertKind::RenewalOverdue => "renewal_overdue",
        }
    }
}

/// Alert severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

/// Time-to-due window that produced an alert
///
/// Payment alerts use {overdue, 7, 10, 15, 30} days; renewal alerts use
/// {overdue, 7, 15, 30, 45} days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BucketCategory {
    #[serde(rename = "overdue")]
    Overdue,
    #[serde(rename = "7_days")]
    Days7,
    #[serde(rename = "10_days")]
    Days10,
    #[serde(rename = "15_days")]
    Days15,
    #[serde(rename = "30_days")]
    Days30,
    #[serde(rename = "45_days")]
    Days45,
}

impl BucketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketCategory::Overdue => "overdue",
            BucketCategory::Days7 => "7_days",
            BucketCategory::Days10 => "10_days",
            BucketCategory::Days15 => "15_days",
            BucketCategory::Days30 => "30_days",
            BucketCategory::Days45 => "45_days",
        }
    }

    /// Sort priority (lower = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            BucketCategory::Overdue => 0,
            BucketCategory::Days7 => 1,
            BucketCategory::Days10 | BucketCategory::Days15 => 2,
            BucketCategory::Days30 => 3,
            BucketCategory::Days45 => 4,
        }
    }

    /// Alerts in these buckets stay visible until the condition is resolved
    pub fn is_persistent(&self) -> bool {
        matches!(self, BucketCategory::Overdue | BucketCategory::Days7)
    }
}

/// A payment or renewal alert for one policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Deterministic identity: `{policy_id}:{source}:{bucket}`
    pub id: String,
    pub policy_id: String,
    pub policy_number: String,
    pub holder_name: String,
    pub kind: AlertKind,
    pub severity: Severity,
    pub bucket_category: BucketCategory,
    /// Signed day distance from today; negative means overdue
    pub days_until_due: i64,
    pub due_date: NaiveDate,
    pub is_persistent: bool,
    pub priority: u8,
    /// Policy total amount (i64 cents)
    pub amount: i64,
}

impl Alert {
    /// Build the stable identity of an alert
    pub fn derive_id(policy_id: &str, source: AlertSource, bucket: BucketCategory) -> String {
        format!("{}:{}:{}", policy_id, source.as_str(), bucket.as_str())
    }

    pub fn source(&self) -> AlertSource {
        self.kind.source()
    }

    pub fn is_overdue(&self) -> bool {
        self.days_until_due < 0
    }

    /// Default English wording for the alert
    ///
    /// Presentation layers are free to render their own text from `kind`,
    /// `bucket_category` and `days_until_due`.
    pub fn message(&self) -> String {
        let days = self.days_until_due;
        match self.source() {
            AlertSource::Payment => match days {
                0 => format!("Payment for policy {} is due today", self.policy_number),
                d if d > 0 => format!(
                    "Payment for policy {} has {} {} remaining",
                    self.policy_number,
                    d,
                    day_word(d)
                ),
                d => format!(
                    "Payment for policy {} is {} {} overdue",
                    self.policy_number,
                    -d,
                    day_word(-d)
                ),
            },
            AlertSource::Renewal => match days {
                0 => format!("Policy {} expires today", self.policy_number),
                d if d > 0 => format!(
                    "Policy {} expires in {} {}",
                    self.policy_number,
                    d,
                    day_word(d)
                ),
                d => format!(
                    "Policy {} expired {} {} ago",
                    self.policy_number,
                    -d,
                    day_word(-d)
                ),
            },
        }
    }
}

fn day_word(days: i64) -> &'static str {
    if days == 1 {
        "day"
    } else {
        "days"
    }
}

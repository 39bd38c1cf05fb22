//! Policy record model
//!
//! A `PolicyRecord` is the engine's read-only view of one insurance policy,
//! supplied per invocation by the data layer. Each record carries:
//! - Identity and display fields (id, policy number, holder name)
//! - Current lifecycle status
//! - Payment frequency and last payment date (payment alerts)
//! - Expiration date (renewal alerts)
//! - Total amount (i64 cents)
//!
//! Dates stay in their stored string form. They are parsed lazily by the
//! classifier so that a malformed value only disables the alert kind that
//! needs it.
//!
//! Deserialization is field-tolerant: a wrongly typed date, status or
//! amount degrades to a safe value instead of failing the whole record.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::calendar::parse_optional_date;

/// Lifecycle status of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    #[default]
    Active,
    Pending,
    Expired,
    Cancelled,
    PendingRenewal,
    OverdueCritical,
}

impl PolicyStatus {
    /// Cancelled policies never produce payment or renewal alerts
    pub fn is_alert_eligible(&self) -> bool {
        !matches!(self, PolicyStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "active",
            PolicyStatus::Pending => "pending",
            PolicyStatus::Expired => "expired",
            PolicyStatus::Cancelled => "cancelled",
            PolicyStatus::PendingRenewal => "pending_renewal",
            PolicyStatus::OverdueCritical => "overdue_critical",
        }
    }
}

/// How often premiums are paid
///
/// Any value the data layer sends that is not one of the four known
/// frequencies (including `null`) lands in `Other`, which uses the monthly
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Quarterly,
    #[serde(alias = "semi_annual")]
    Semiannual,
    Annual,
    #[serde(other)]
    Other,
}

impl PaymentFrequency {
    /// Days between two consecutive payments
    pub fn interval_days(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 30,
            PaymentFrequency::Quarterly => 90,
            PaymentFrequency::Semiannual => 180,
            PaymentFrequency::Annual => 365,
            PaymentFrequency::Other => 30,
        }
    }
}

fn frequency_or_other<'de, D>(deserializer: D) -> Result<PaymentFrequency, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<PaymentFrequency>::deserialize(deserializer)?.unwrap_or(PaymentFrequency::Other))
}

/// Unknown, null or non-string statuses read as `Active`
fn status_or_default<'de, D>(deserializer: D) -> Result<PolicyStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default())
}

/// Keep string dates as-is; any other non-null value keeps its JSON text so
/// it is reported as unparseable rather than missing
fn date_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Integer amounts are cents; decimal amounts are currency units and are
/// rounded to cents. Negative and non-numeric amounts read as zero.
fn amount_cents<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let cents = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => match number.as_i64() {
            Some(cents) => cents,
            None => number.as_f64().map_or(0, |units| (units * 100.0).round() as i64),
        },
        _ => 0,
    };
    Ok(cents.max(0))
}

/// One policy as seen by the alert engine
///
/// # Example
/// ```
/// use policy_alerts_core::{PaymentFrequency, PolicyRecord};
///
/// let policy = PolicyRecord::new("p-1", "POL-0001", "Ana Ruiz")
///     .with_frequency(PaymentFrequency::Quarterly)
///     .with_last_payment_date("2024-05-22")
///     .with_total_amount(125_000);
///
/// assert_eq!(policy.payment_frequency.interval_days(), 90);
/// assert!(policy.last_payment().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    pub id: String,

    #[serde(default)]
    pub policy_number: String,

    #[serde(default, deserialize_with = "status_or_default")]
    pub status: PolicyStatus,

    #[serde(default, deserialize_with = "frequency_or_other")]
    pub payment_frequency: PaymentFrequency,

    #[serde(default, deserialize_with = "date_text", skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<String>,

    #[serde(default, deserialize_with = "date_text", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    /// Total premium amount (i64 cents, never negative)
    #[serde(default, deserialize_with = "amount_cents")]
    pub total_amount: i64,

    #[serde(default)]
    pub holder_name: String,
}

impl PolicyRecord {
    /// Create an active, monthly policy with no dates set
    pub fn new(
        id: impl Into<String>,
        policy_number: impl Into<String>,
        holder_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            policy_number: policy_number.into(),
            status: PolicyStatus::Active,
            payment_frequency: PaymentFrequency::Monthly,
            last_payment_date: None,
            expiration_date: None,
            total_amount: 0,
            holder_name: holder_name.into(),
        }
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.payment_frequency = frequency;
        self
    }

    pub fn with_last_payment_date(mut self, date: impl Into<String>) -> Self {
        self.last_payment_date = Some(date.into());
        self
    }

    pub fn with_expiration_date(mut self, date: impl Into<String>) -> Self {
        self.expiration_date = Some(date.into());
        self
    }

    /// Negative amounts are clamped to zero
    pub fn with_total_amount(mut self, cents: i64) -> Self {
        self.total_amount = cents.max(0);
        self
    }

    /// Last payment date, `None` when absent or unparseable
    pub fn last_payment(&self) -> Option<NaiveDate> {
        parse_optional_date(self.last_payment_date.as_deref())
    }

    /// Expiration date, `None` when absent or unparseable
    pub fn expiration(&self) -> Option<NaiveDate> {
        parse_optional_date(self.expiration_date.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_intervals() {
        assert_eq!(PaymentFrequency::Monthly.interval_days(), 30);
        assert_eq!(PaymentFrequency::Quarterly.interval_days(), 90);
        assert_eq!(PaymentFrequency::Semiannual.interval_days(), 180);
        assert_eq!(PaymentFrequency::Annual.interval_days(), 365);
        assert_eq!(PaymentFrequency::Other.interval_days(), 30);
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{
            "id": "p-1",
            "policyNumber": "POL-0001",
            "status": "pending_renewal",
            "paymentFrequency": "annual",
            "lastPaymentDate": "2024-01-15",
            "expirationDate": "2025-01-15",
            "totalAmount": 99900,
            "holderName": "Ana Ruiz"
        }"#;

        let policy: PolicyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(policy.status, PolicyStatus::PendingRenewal);
        assert_eq!(policy.payment_frequency, PaymentFrequency::Annual);
        assert_eq!(policy.total_amount, 99_900);
        assert_eq!(
            policy.expiration(),
            NaiveDate::from_ymd_opt(2025, 1, 15)
        );
    }

    #[test]
    fn test_unknown_or_null_frequency_falls_back() {
        let weekly: PolicyRecord =
            serde_json::from_str(r#"{"id": "p-1", "paymentFrequency": "weekly"}"#).unwrap();
        assert_eq!(weekly.payment_frequency, PaymentFrequency::Other);

        let null: PolicyRecord =
            serde_json::from_str(r#"{"id": "p-2", "paymentFrequency": null}"#).unwrap();
        assert_eq!(null.payment_frequency, PaymentFrequency::Other);

        let missing: PolicyRecord = serde_json::from_str(r#"{"id": "p-3"}"#).unwrap();
        assert_eq!(missing.payment_frequency, PaymentFrequency::Monthly);
        assert_eq!(missing.payment_frequency.interval_days(), 30);
    }

    #[test]
    fn test_semi_annual_alias() {
        let policy: PolicyRecord =
            serde_json::from_str(r#"{"id": "p-1", "paymentFrequency": "semi_annual"}"#).unwrap();
        assert_eq!(policy.payment_frequency, PaymentFrequency::Semiannual);
    }

    #[test]
    fn test_malformed_dates_read_as_missing() {
        let policy = PolicyRecord::new("p-1", "POL-1", "Holder")
            .with_last_payment_date("yesterday")
            .with_expiration_date("");

        assert_eq!(policy.last_payment(), None);
        assert_eq!(policy.expiration(), None);
    }

    #[test]
    fn test_wrongly_typed_fields_degrade() {
        let json = r#"{
            "id": "p-1",
            "status": "suspended",
            "lastPaymentDate": 20240401,
            "expirationDate": null,
            "totalAmount": 899.50
        }"#;

        let policy: PolicyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(policy.status, PolicyStatus::Active);
        assert_eq!(policy.last_payment_date.as_deref(), Some("20240401"));
        assert_eq!(policy.last_payment(), None);
        assert_eq!(policy.expiration_date, None);
        assert_eq!(policy.total_amount, 89_950);
    }

    #[test]
    fn test_amount_shapes() {
        let amount = |raw: &str| -> i64 {
            let json = format!(r#"{{"id": "p-1", "totalAmount": {}}}"#, raw);
            serde_json::from_str::<PolicyRecord>(&json).unwrap().total_amount
        };

        assert_eq!(amount("125000"), 125_000);
        assert_eq!(amount("1250.5"), 125_050);
        assert_eq!(amount("1250.0"), 125_000);
        assert_eq!(amount("-4000"), 0);
        assert_eq!(amount("\"lots\""), 0);
        assert_eq!(amount("null"), 0);
    }

    #[test]
    fn test_negative_builder_amount_is_clamped() {
        let policy = PolicyRecord::new("p-1", "POL-1", "Holder").with_total_amount(-500);
        assert_eq!(policy.total_amount, 0);
    }

    #[test]
    fn test_only_cancelled_is_ineligible() {
        assert!(PolicyStatus::Active.is_alert_eligible());
        assert!(PolicyStatus::Expired.is_alert_eligible());
        assert!(PolicyStatus::OverdueCritical.is_alert_eligible());
        assert!(!PolicyStatus::Cancelled.is_alert_eligible());
    }
}

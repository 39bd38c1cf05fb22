//! Tests for the Payment Status Classifier and derived policy status

use chrono::NaiveDate;
use policy_alerts_core::{
    classify, classify_with, derive_status, AlertConfig, PaymentFrequency, PaymentState,
    PolicyRecord, PolicyStatus,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
}

fn policy(frequency: PaymentFrequency, last_paid: &str) -> PolicyRecord {
    PolicyRecord::new("p-1", "POL-1", "Holder")
        .with_frequency(frequency)
        .with_last_payment_date(last_paid)
}

#[test]
fn test_next_due_date_per_frequency() {
    let cases = [
        (PaymentFrequency::Monthly, "2024-06-01", (2024, 7, 1)),
        (PaymentFrequency::Quarterly, "2024-06-01", (2024, 8, 30)),
        (PaymentFrequency::Semiannual, "2024-06-01", (2024, 11, 28)),
        (PaymentFrequency::Annual, "2024-06-01", (2025, 6, 1)),
        (PaymentFrequency::Other, "2024-06-01", (2024, 7, 1)),
    ];

    for (frequency, last_paid, (y, m, d)) in cases {
        let result = classify(&policy(frequency, last_paid), today());
        assert_eq!(
            result.next_due_date,
            NaiveDate::from_ymd_opt(y, m, d),
            "{:?}",
            frequency
        );
    }
}

#[test]
fn test_states_in_rule_order() {
    // Monthly: next due = last paid + 30
    let cases = [
        ("2024-04-01", -50, PaymentState::OverdueCritical),
        ("2024-05-13", -8, PaymentState::OverdueCritical),
        ("2024-05-14", -7, PaymentState::Overdue),
        ("2024-05-20", -1, PaymentState::Overdue),
        ("2024-05-21", 0, PaymentState::DueSoon),
        ("2024-05-28", 7, PaymentState::DueSoon),
        ("2024-05-29", 8, PaymentState::Current),
    ];

    for (last_paid, days, state) in cases {
        let result = classify(&policy(PaymentFrequency::Monthly, last_paid), today());
        assert_eq!(result.days_until_due, Some(days), "last_paid={}", last_paid);
        assert_eq!(result.state, state, "last_paid={}", last_paid);
    }
}

#[test]
fn test_unknown_without_history() {
    let result = classify(&PolicyRecord::new("p-1", "POL-1", "Holder"), today());
    assert_eq!(result.state, PaymentState::Unknown);
}

#[test]
fn test_classify_does_not_cache_across_days() {
    let p = policy(PaymentFrequency::Monthly, "2024-05-22");
    let tomorrow = today().succ_opt().unwrap();

    assert_eq!(classify(&p, today()).days_until_due, Some(1));
    assert_eq!(classify(&p, tomorrow).days_until_due, Some(0));
}

#[test]
fn test_classify_with_custom_escalation() {
    let config = AlertConfig {
        critical_overdue_days: 0,
        ..AlertConfig::default()
    };
    let p = policy(PaymentFrequency::Monthly, "2024-05-20");
    assert_eq!(classify_with(&p, today(), &config).state, PaymentState::OverdueCritical);
}

#[test]
fn test_derive_status_short_overdue_stays_active() {
    let p = policy(PaymentFrequency::Monthly, "2024-05-15");
    assert_eq!(
        derive_status(&p, today(), &AlertConfig::default()),
        PolicyStatus::Active
    );
}

#[test]
fn test_derive_status_payment_beats_expiration() {
    let p = policy(PaymentFrequency::Monthly, "2024-03-01").with_expiration_date("2024-06-01");
    assert_eq!(
        derive_status(&p, today(), &AlertConfig::default()),
        PolicyStatus::OverdueCritical
    );
}

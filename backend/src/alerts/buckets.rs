//! Bucket, severity and kind tables
//!
//! | days until due | payment bucket | renewal bucket |
//! |----------------|----------------|----------------|
//! | < 0            | overdue        | overdue        |
//! | 0..=7          | 7_days         | 7_days         |
//! | 8..=10         | 10_days        | 15_days        |
//! | 11..=15        | 15_days        | 15_days        |
//! | 16..=30        | 30_days        | 30_days        |
//! | 31..=45        | none           | 45_days        |
//!
//! Severity: overdue is critical past the escalation threshold and error
//! before it; 7_days is error; 10/15_days are warning; 30_days is info for
//! payments and warning for renewals; 45_days is info.

use crate::config::AlertConfig;
use crate::models::alert::{AlertKind, AlertSource, BucketCategory, Severity};

/// Smallest payment window enclosing `days_until_due`
pub fn payment_bucket(days_until_due: i64) -> Option<BucketCategory> {
    match days_until_due {
        d if d < 0 => Some(BucketCategory::Overdue),
        0..=7 => Some(BucketCategory::Days7),
        8..=10 => Some(BucketCategory::Days10),
        11..=15 => Some(BucketCategory::Days15),
        16..=30 => Some(BucketCategory::Days30),
        _ => None,
    }
}

/// Smallest renewal window enclosing `days_until_due`
pub fn renewal_bucket(days_until_due: i64) -> Option<BucketCategory> {
    match days_until_due {
        d if d < 0 => Some(BucketCategory::Overdue),
        0..=7 => Some(BucketCategory::Days7),
        8..=15 => Some(BucketCategory::Days15),
        16..=30 => Some(BucketCategory::Days30),
        31..=45 => Some(BucketCategory::Days45),
        _ => None,
    }
}

pub fn bucket_for(source: AlertSource, days_until_due: i64) -> Option<BucketCategory> {
    match source {
        AlertSource::Payment => payment_bucket(days_until_due),
        AlertSource::Renewal => renewal_bucket(days_until_due),
    }
}

pub fn severity_for(
    source: AlertSource,
    bucket: BucketCategory,
    days_until_due: i64,
    config: &AlertConfig,
) -> Severity {
    match bucket {
        BucketCategory::Overdue if config.is_critically_overdue(days_until_due) => Severity::Critical,
        BucketCategory::Overdue | BucketCategory::Days7 => Severity::Error,
        BucketCategory::Days10 | BucketCategory::Days15 => Severity::Warning,
        BucketCategory::Days30 => match source {
            AlertSource::Payment => Severity::Info,
            AlertSource::Renewal => Severity::Warning,
        },
        BucketCategory::Days45 => Severity::Info,
    }
}

pub fn kind_for(source: AlertSource, days_until_due: i64, config: &AlertConfig) -> AlertKind {
    match source {
        AlertSource::Payment if config.is_critically_overdue(days_until_due) => {
            AlertKind::PaymentOverdueCritical
        }
        AlertSource::Payment if days_until_due < 0 => AlertKind::PaymentOverdue,
        AlertSource::Payment => AlertKind::PaymentDue,
        AlertSource::Renewal if days_until_due < 0 => AlertKind::RenewalOverdue,
        AlertSource::Renewal => AlertKind::RenewalUpcoming,
    }
}

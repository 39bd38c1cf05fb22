//! Alert Generator
//!
//! Turns a snapshot of policies into a sorted, deduplicated alert list.
//!
//! # Pass structure
//!
//! For every policy, in input order:
//! 1. A repeated policy id is skipped (first record wins)
//! 2. Cancelled policies are skipped
//! 3. Payment alert: classify, then bucket the next due date if it falls
//!    within the payment horizon
//! 4. Renewal alert: bucket the expiration date if it falls within the
//!    renewal horizon
//!
//! A missing or malformed date only suppresses the alert source that needs
//! it. The pass never fails.
//!
//! # Ordering
//!
//! Ascending `priority`, then ascending `days_until_due`, then `id`. The id
//! tie-break makes the order total, so equal inputs give identical output.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::buckets::{bucket_for, kind_for, severity_for};
use crate::classifier::classify_with;
use crate::config::AlertConfig;
use crate::core::calendar::days_between;
use crate::models::alert::{Alert, AlertSource};
use crate::models::event::{EngineEvent, EngineLog, SkipReason};
use crate::models::policy::PolicyRecord;

/// Generate alerts with the default thresholds
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use policy_alerts_core::{generate_alerts, BucketCategory, PolicyRecord, Severity};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
/// let policies = vec![
///     PolicyRecord::new("p-1", "POL-1", "Ana Ruiz").with_last_payment_date("2024-05-22"),
///     PolicyRecord::new("p-2", "POL-2", "Luis Gil").with_last_payment_date("2024-04-01"),
/// ];
///
/// let alerts = generate_alerts(&policies, today);
/// assert_eq!(alerts.len(), 2);
///
/// // Overdue first
/// assert_eq!(alerts[0].policy_id, "p-2");
/// assert_eq!(alerts[0].days_until_due, -50);
/// assert_eq!(alerts[0].severity, Severity::Critical);
///
/// assert_eq!(alerts[1].bucket_category, BucketCategory::Days7);
/// assert!(alerts[1].is_persistent);
/// ```
pub fn generate_alerts(policies: &[PolicyRecord], today: NaiveDate) -> Vec<Alert> {
    run_pass(policies, today, &AlertConfig::default(), None)
}

/// Generate alerts with custom thresholds
pub fn generate_alerts_with(
    policies: &[PolicyRecord],
    today: NaiveDate,
    config: &AlertConfig,
) -> Vec<Alert> {
    run_pass(policies, today, config, None)
}

/// Generate alerts, recording skips and emissions into `log`
pub fn generate_alerts_logged(
    policies: &[PolicyRecord],
    today: NaiveDate,
    config: &AlertConfig,
    log: &mut EngineLog,
) -> Vec<Alert> {
    run_pass(policies, today, config, Some(log))
}

/// Sort alerts into display order
pub fn sort_alerts(alerts: &mut [Alert]) {
    alerts.sort_by(compare_alerts);
}

fn compare_alerts(a: &Alert, b: &Alert) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then(a.days_until_due.cmp(&b.days_until_due))
        .then_with(|| a.id.cmp(&b.id))
}

fn run_pass(
    policies: &[PolicyRecord],
    today: NaiveDate,
    config: &AlertConfig,
    mut log: Option<&mut EngineLog>,
) -> Vec<Alert> {
    record(
        &mut log,
        EngineEvent::PassStarted {
            today,
            policy_count: policies.len(),
        },
    );

    let mut seen: HashSet<&str> = HashSet::with_capacity(policies.len());
    let mut alerts = Vec::new();
    let mut skipped = 0usize;

    for policy in policies {
        let skip_all = if !seen.insert(policy.id.as_str()) {
            Some(SkipReason::DuplicatePolicy)
        } else if !policy.status.is_alert_eligible() {
            Some(SkipReason::Cancelled)
        } else {
            None
        };

        if let Some(reason) = skip_all {
            for source in [AlertSource::Payment, AlertSource::Renewal] {
                skip(&mut log, policy, source, reason);
                skipped += 1;
            }
            continue;
        }

        for source in [AlertSource::Payment, AlertSource::Renewal] {
            match alert_for(policy, source, today, config) {
                Ok(Some(alert)) => {
                    if let Some(log) = log.as_deref_mut() {
                        log.log(EngineEvent::AlertEmitted {
                            policy_id: alert.policy_id.clone(),
                            alert_id: alert.id.clone(),
                            kind: alert.kind,
                            bucket: alert.bucket_category,
                        });
                    }
                    alerts.push(alert);
                }
                Ok(None) => {}
                Err(reason) => {
                    skip(&mut log, policy, source, reason);
                    skipped += 1;
                }
            }
        }
    }

    sort_alerts(&mut alerts);

    let persistent_count = alerts.iter().filter(|a| a.is_persistent).count();
    record(
        &mut log,
        EngineEvent::PassCompleted {
            today,
            alert_count: alerts.len(),
            persistent_count,
        },
    );
    debug!(
        %today,
        policies = policies.len(),
        alerts = alerts.len(),
        persistent = persistent_count,
        skipped,
        "alert pass complete"
    );

    alerts
}

/// Build the alert for one policy and source
///
/// `Ok(None)` means the date is usable but outside the horizon.
fn alert_for(
    policy: &PolicyRecord,
    source: AlertSource,
    today: NaiveDate,
    config: &AlertConfig,
) -> Result<Option<Alert>, SkipReason> {
    let (due_date, days_until_due, horizon) = match source {
        AlertSource::Payment => {
            let classification = classify_with(policy, today, config);
            match (classification.next_due_date, classification.days_until_due) {
                (Some(due), Some(days)) => (due, days, config.payment_horizon_days),
                _ => return Err(date_skip_reason(policy.last_payment_date.as_deref())),
            }
        }
        AlertSource::Renewal => {
            let expiration = policy
                .expiration()
                .ok_or_else(|| date_skip_reason(policy.expiration_date.as_deref()))?;
            (
                expiration,
                days_between(today, expiration),
                config.renewal_horizon_days,
            )
        }
    };

    if days_until_due > horizon {
        return Ok(None);
    }
    let Some(bucket) = bucket_for(source, days_until_due) else {
        return Ok(None);
    };

    Ok(Some(Alert {
        id: Alert::derive_id(&policy.id, source, bucket),
        policy_id: policy.id.clone(),
        policy_number: policy.policy_number.clone(),
        holder_name: policy.holder_name.clone(),
        kind: kind_for(source, days_until_due, config),
        severity: severity_for(source, bucket, days_until_due, config),
        bucket_category: bucket,
        days_until_due,
        due_date,
        is_persistent: bucket.is_persistent(),
        priority: bucket.priority(),
        amount: policy.total_amount.max(0),
    }))
}

fn date_skip_reason(raw: Option<&str>) -> SkipReason {
    // Also covers dates that parse but overflow once the interval is added
    match raw {
        Some(value) if !value.trim().is_empty() => SkipReason::UnparseableDate,
        _ => SkipReason::MissingDate,
    }
}

fn skip(
    log: &mut Option<&mut EngineLog>,
    policy: &PolicyRecord,
    source: AlertSource,
    reason: SkipReason,
) {
    trace!(
        policy_id = %policy.id,
        source = source.as_str(),
        reason = reason.as_str(),
        "record skipped"
    );
    record(
        log,
        EngineEvent::RecordSkipped {
            policy_id: policy.id.clone(),
            source,
            reason,
        },
    );
}

fn record(log: &mut Option<&mut EngineLog>, event: EngineEvent) {
    if let Some(log) = log.as_deref_mut() {
        log.log(event);
    }
}

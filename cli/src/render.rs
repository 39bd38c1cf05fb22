//! Text rendering for terminal output

use policy_alerts_core::{Alert, Statistics, StatusUpdate};

/// Format i64 cents as a decimal amount
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

pub fn alerts_table(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No alerts.\n".to_string();
    }

    let mut out = String::new();
    for alert in alerts {
        let marker = if alert.is_persistent { "!" } else { " " };
        out.push_str(&format!(
            "{} {} {} {} {:>5}d  {}  {}  {}\n",
            marker,
            pad_right(alert.severity.as_str(), 8),
            pad_right(alert.bucket_category.as_str(), 7),
            pad_right(&alert.policy_number, 12),
            alert.days_until_due,
            alert.due_date,
            pad_right(&alert.holder_name, 20),
            alert.message(),
        ));
    }
    out
}

pub fn statistics_summary(stats: &Statistics) -> String {
    let mut out = format!(
        "total: {}\npersistent: {}\noverdue amount: {}\n",
        stats.total,
        stats.persistent_count,
        format_cents(stats.overdue_amount)
    );

    out.push_str("by severity:\n");
    for (severity, count) in &stats.by_severity {
        out.push_str(&format!("  {}: {}\n", severity.as_str(), count));
    }
    out.push_str("by bucket:\n");
    for (bucket, count) in &stats.by_bucket {
        out.push_str(&format!("  {}: {}\n", bucket.as_str(), count));
    }
    out.push_str("by kind:\n");
    for (kind, count) in &stats.by_kind {
        out.push_str(&format!("  {}: {}\n", kind.as_str(), count));
    }
    out
}

pub fn status_table(updates: &[StatusUpdate], changed_only: bool) -> String {
    let mut out = String::new();
    for update in updates.iter().filter(|u| !changed_only || u.is_changed()) {
        let arrow = if update.is_changed() { "->" } else { "==" };
        out.push_str(&format!(
            "{} {} {} {}\n",
            pad_right(&update.policy_number, 12),
            pad_right(update.current.as_str(), 16),
            arrow,
            update.derived.as_str(),
        ));
    }
    if out.is_empty() {
        out.push_str("No status changes.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(123_456), "1234.56");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(-250), "-2.50");
    }

    #[test]
    fn test_empty_outputs() {
        assert_eq!(alerts_table(&[]), "No alerts.\n");
        assert_eq!(status_table(&[], true), "No status changes.\n");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
    }
}

//! Engine configuration
//!
//! `AlertConfig::default()` reproduces the standard rule table exactly:
//! payment alerts within 30 days, renewal alerts within 45 days, and
//! escalation to critical once something is more than 7 days overdue.
//! Custom configs may narrow the horizons but never widen them past the
//! largest bucket of each table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest payment bucket (30 days)
pub const MAX_PAYMENT_HORIZON_DAYS: i64 = 30;

/// Largest renewal bucket (45 days)
pub const MAX_RENEWAL_HORIZON_DAYS: i64 = 45;

/// Errors from validating an `AlertConfig`
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be between 0 and {max} days, got {value}")]
    HorizonOutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },

    #[error("critical_overdue_days must not be negative, got {0}")]
    NegativeCriticalOverdue(i64),

    #[error("Invalid config JSON: {0}")]
    Parse(String),
}

/// Alerting thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Payment alerts are emitted when the next due date is at most this many days away
    pub payment_horizon_days: i64,

    /// Renewal alerts are emitted when expiration is at most this many days away
    pub renewal_horizon_days: i64,

    /// Overdue by more than this many days escalates to critical
    pub critical_overdue_days: i64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            payment_horizon_days: MAX_PAYMENT_HORIZON_DAYS,
            renewal_horizon_days: MAX_RENEWAL_HORIZON_DAYS,
            critical_overdue_days: 7,
        }
    }
}

impl AlertConfig {
    /// Parse and validate a JSON config; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AlertConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_horizon(
            "payment_horizon_days",
            self.payment_horizon_days,
            MAX_PAYMENT_HORIZON_DAYS,
        )?;
        check_horizon(
            "renewal_horizon_days",
            self.renewal_horizon_days,
            MAX_RENEWAL_HORIZON_DAYS,
        )?;
        if self.critical_overdue_days < 0 {
            return Err(ConfigError::NegativeCriticalOverdue(
                self.critical_overdue_days,
            ));
        }
        Ok(())
    }

    /// True when `days_until_due` is far enough past due to be critical
    pub fn is_critically_overdue(&self, days_until_due: i64) -> bool {
        days_until_due < -self.critical_overdue_days
    }
}

fn check_horizon(field: &'static str, value: i64, max: i64) -> Result<(), ConfigError> {
    if (0..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::HorizonOutOfRange { field, value, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AlertConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.payment_horizon_days, 30);
        assert_eq!(config.renewal_horizon_days, 45);
        assert_eq!(config.critical_overdue_days, 7);
    }

    #[test]
    fn test_critical_threshold() {
        let config = AlertConfig::default();
        assert!(!config.is_critically_overdue(-7));
        assert!(config.is_critically_overdue(-8));
        assert!(!config.is_critically_overdue(3));
    }

    #[test]
    fn test_rejects_wide_payment_horizon() {
        let config = AlertConfig {
            payment_horizon_days: 31,
            ..AlertConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::HorizonOutOfRange {
                field: "payment_horizon_days",
                value: 31,
                max: 30,
            })
        );
    }

    #[test]
    fn test_rejects_negative_values() {
        let renewal = AlertConfig {
            renewal_horizon_days: -1,
            ..AlertConfig::default()
        };
        assert!(matches!(
            renewal.validate(),
            Err(ConfigError::HorizonOutOfRange { field: "renewal_horizon_days", .. })
        ));

        let grace = AlertConfig {
            critical_overdue_days: -2,
            ..AlertConfig::default()
        };
        assert_eq!(grace.validate(), Err(ConfigError::NegativeCriticalOverdue(-2)));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = AlertConfig::from_json(r#"{"renewal_horizon_days": 20}"#).unwrap();
        assert_eq!(config.renewal_horizon_days, 20);
        assert_eq!(config.payment_horizon_days, 30);

        assert!(matches!(
            AlertConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(AlertConfig::from_json(r#"{"payment_horizon_days": 90}"#).is_err());
    }
}

//! Engine event log
//!
//! Records what happened during alert passes: which records were skipped
//! and why, which alerts were emitted, and per-pass summaries.
//!
//! The log is owned by the caller and handed to the engine by `&mut` for the
//! passes it wants recorded. There is no global log. It is bounded: once
//! `capacity` events are held, the oldest event is evicted for each new one
//! and counted in `dropped_count()`.
//!
//! # Example
//!
//! ```rust
//! use policy_alerts_core::models::event::{EngineEvent, EngineLog, SkipReason};
//! use policy_alerts_core::AlertSource;
//!
//! let mut log = EngineLog::with_capacity(2);
//! for id in ["p-1", "p-2", "p-3"] {
//!     log.log(EngineEvent::RecordSkipped {
//!         policy_id: id.to_string(),
//!         source: AlertSource::Payment,
//!         reason: SkipReason::MissingDate,
//!     });
//! }
//!
//! assert_eq!(log.len(), 2);
//! assert_eq!(log.dropped_count(), 1);
//! ```

use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::models::alert::{AlertKind, AlertSource, BucketCategory};

/// Default number of events retained by [`EngineLog::new`]
pub const DEFAULT_LOG_CAPACITY: usize = 10_000;

/// Why a policy produced no alert for a given source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Date needed by this alert source is absent
    MissingDate,
    /// Date is present but could not be parsed
    UnparseableDate,
    /// Policy is cancelled
    Cancelled,
    /// An earlier record in the same batch had the same policy id
    DuplicatePolicy,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingDate => "missing_date",
            SkipReason::UnparseableDate => "unparseable_date",
            SkipReason::Cancelled => "cancelled",
            SkipReason::DuplicatePolicy => "duplicate_policy",
        }
    }
}

/// Something the engine did during a pass
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PassStarted {
        today: NaiveDate,
        policy_count: usize,
    },

    RecordSkipped {
        policy_id: String,
        source: AlertSource,
        reason: SkipReason,
    },

    AlertEmitted {
        policy_id: String,
        alert_id: String,
        kind: AlertKind,
        bucket: BucketCategory,
    },

    PassCompleted {
        today: NaiveDate,
        alert_count: usize,
        persistent_count: usize,
    },
}

impl EngineEvent {
    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::PassStarted { .. } => "PassStarted",
            EngineEvent::RecordSkipped { .. } => "RecordSkipped",
            EngineEvent::AlertEmitted { .. } => "AlertEmitted",
            EngineEvent::PassCompleted { .. } => "PassCompleted",
        }
    }

    /// Get policy ID if event relates to a specific policy
    pub fn policy_id(&self) -> Option<&str> {
        match self {
            EngineEvent::RecordSkipped { policy_id, .. } => Some(policy_id),
            EngineEvent::AlertEmitted { policy_id, .. } => Some(policy_id),
            _ => None,
        }
    }
}

/// Bounded, append-only log of engine events
#[derive(Debug, Clone)]
pub struct EngineLog {
    events: VecDeque<EngineEvent>,
    capacity: usize,
    dropped: usize,
}

impl Default for EngineLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineLog {
    /// Create a log holding up to [`DEFAULT_LOG_CAPACITY`] events
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Create a log holding up to `capacity` events
    ///
    /// # Panics
    /// Panics if capacity is zero
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            events: VecDeque::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Append an event, evicting the oldest one when full
    pub fn log(&mut self, event: EngineEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of events evicted since creation (or the last `clear`)
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Iterate over retained events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &EngineEvent> {
        self.events.iter()
    }

    /// Retained events from `offset`, at most `limit` of them
    pub fn page(&self, offset: usize, limit: usize) -> Vec<&EngineEvent> {
        self.events.iter().skip(offset).take(limit).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&EngineEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific policy
    pub fn events_for_policy(&self, policy_id: &str) -> Vec<&EngineEvent> {
        self.events
            .iter()
            .filter(|e| e.policy_id() == Some(policy_id))
            .collect()
    }

    /// Clear all events and reset the dropped counter
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skipped(policy_id: &str) -> EngineEvent {
        EngineEvent::RecordSkipped {
            policy_id: policy_id.to_string(),
            source: AlertSource::Renewal,
            reason: SkipReason::UnparseableDate,
        }
    }

    fn emitted(policy_id: &str) -> EngineEvent {
        EngineEvent::AlertEmitted {
            policy_id: policy_id.to_string(),
            alert_id: format!("{}:payment:7_days", policy_id),
            kind: AlertKind::PaymentDue,
            bucket: BucketCategory::Days7,
        }
    }

    #[test]
    fn test_event_type() {
        assert_eq!(skipped("p-1").event_type(), "RecordSkipped");
        assert_eq!(emitted("p-1").event_type(), "AlertEmitted");
    }

    #[test]
    fn test_event_policy_id() {
        let started = EngineEvent::PassStarted {
            today: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            policy_count: 3,
        };
        assert_eq!(started.policy_id(), None);
        assert_eq!(emitted("p-9").policy_id(), Some("p-9"));
    }

    #[test]
    fn test_log_basic() {
        let mut log = EngineLog::new();
        assert!(log.is_empty());
        assert_eq!(log.capacity(), DEFAULT_LOG_CAPACITY);

        log.log(skipped("p-1"));
        assert_eq!(log.len(), 1);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_log_evicts_oldest_when_full() {
        let mut log = EngineLog::with_capacity(2);
        log.log(skipped("p-1"));
        log.log(skipped("p-2"));
        log.log(skipped("p-3"));

        let ids: Vec<_> = log.iter().filter_map(|e| e.policy_id()).collect();
        assert_eq!(ids, vec!["p-2", "p-3"]);
        assert_eq!(log.dropped_count(), 1);
    }

    #[test]
    fn test_log_queries() {
        let mut log = EngineLog::new();
        log.log(skipped("p-1"));
        log.log(emitted("p-1"));
        log.log(emitted("p-2"));

        assert_eq!(log.events_of_type("AlertEmitted").len(), 2);
        assert_eq!(log.events_for_policy("p-1").len(), 2);
        assert_eq!(log.page(1, 10).len(), 2);
        assert_eq!(log.page(0, 1).len(), 1);
        assert!(log.page(5, 1).is_empty());
    }

    #[test]
    fn test_log_clear() {
        let mut log = EngineLog::with_capacity(1);
        log.log(skipped("p-1"));
        log.log(skipped("p-2"));
        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.dropped_count(), 0);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn test_zero_capacity_panics() {
        EngineLog::with_capacity(0);
    }
}

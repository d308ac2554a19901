//! Per-event outcomes and the aggregated result of a run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What happened to one fetched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The channel accepted the announcement.
    Sent,
    /// The event was outside the eligibility window.
    Skipped,
    /// The channel rejected the announcement or the call failed.
    Failed,
}

impl OutcomeStatus {
    /// Returns the lowercase name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result for a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOutcome {
    /// The event this outcome belongs to.
    pub event_id: String,
    /// What happened.
    pub status: OutcomeStatus,
    /// Channel error payload or transport failure, for failed outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl NotificationOutcome {
    /// Creates a delivered outcome.
    pub fn sent(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            status: OutcomeStatus::Sent,
            error_detail: None,
        }
    }

    /// Creates an outcome for an event outside the window.
    pub fn skipped(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            status: OutcomeStatus::Skipped,
            error_detail: None,
        }
    }

    /// Creates a failed outcome carrying the channel's error.
    pub fn failed(event_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            status: OutcomeStatus::Failed,
            error_detail: Some(detail.into()),
        }
    }
}

/// Everything a completed run produced.
///
/// A run that aborted before dispatch never produces a `RunResult`; the
/// entry point returns its fatal error instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Outcomes: dispatched events in selection order, then skipped events
    /// in fetch order.
    pub outcomes: Vec<NotificationOutcome>,
}

impl RunResult {
    /// Creates a result from outcomes.
    pub fn new(outcomes: Vec<NotificationOutcome>) -> Self {
        Self { outcomes }
    }

    /// Number of outcomes with `status`.
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Number of delivered announcements.
    pub fn sent(&self) -> usize {
        self.count(OutcomeStatus::Sent)
    }

    /// Number of events left out by selection.
    pub fn skipped(&self) -> usize {
        self.count(OutcomeStatus::Skipped)
    }

    /// Number of failed dispatches.
    pub fn failed(&self) -> usize {
        self.count(OutcomeStatus::Failed)
    }

    /// Returns true when no dispatch failed.
    pub fn all_delivered(&self) -> bool {
        self.failed() == 0
    }

    /// Iterates over failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &NotificationOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Failed)
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sent, {} skipped, {} failed",
            self.sent(),
            self.skipped(),
            self.failed()
        )
    }
}

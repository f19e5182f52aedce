//! crates/tracker_core/src/domain.rs
//!
//! Defines the core data structures of the tracker as the backend exposes them.
//! Storage is owned by the backend; the client only ever holds fresh snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Identifiers
//=========================================================================================

/// Backend identifier of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(pub i64);

/// Backend identifier of a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub i64);

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

//=========================================================================================
// Topics
//=========================================================================================

/// How the sessions of a topic are reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Notes are compared against earlier notes by the backend.
    Automated,
    /// The user self-reports coverage and retention.
    Solo,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Automated => "automated",
            Mode::Solo => "solo",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automated" => Ok(Mode::Automated),
            "solo" => Ok(Mode::Solo),
            other => Err(format!("'{}' is not a topic mode (automated|solo)", other)),
        }
    }
}

/// A subject the user is tracking retention for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub mode: Mode,
}

/// The payload used to create a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTopic {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub mode: Mode,
}

//=========================================================================================
// Sessions
//=========================================================================================

/// Lifecycle status of a review session. `Completed` and `Skipped` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Skipped,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Skipped => "skipped",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::Scheduled)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One scheduled review of a topic.
///
/// `day_index` is assigned by the backend when the schedule is generated and is
/// never computed here. The backend's session listing does not always embed the
/// owning topic, hence the optional `topic_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    pub day_index: u32,
    pub scheduled_for: NaiveDate,
    pub status: SessionStatus,
}

impl Session {
    /// A scheduled session whose date is today.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.status == SessionStatus::Scheduled && self.scheduled_for == today
    }

    /// A scheduled session whose date has already passed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == SessionStatus::Scheduled && self.scheduled_for < today
    }
}

//=========================================================================================
// Automated Mode
//=========================================================================================

/// A note from an earlier session that the latest notes did not cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissedPoint {
    pub text: String,
    /// Best similarity against the new notes, as a 0..=1 fraction.
    pub similarity: f64,
}

/// The backend's verdict after comparing a session's notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Percentage in 0..=100.
    pub recall_score: f64,
    #[serde(default)]
    pub missed_points: Vec<MissedPoint>,
}

//=========================================================================================
// Solo Mode
//=========================================================================================

/// A self-reported coverage/retention pair. Both values are percentages in 0..=100.
///
/// Trend rows may carry extra context; none of it is guaranteed to be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoloMetric {
    pub percent_covered: f64,
    pub percent_remembered: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl SoloMetric {
    pub fn new(percent_covered: f64, percent_remembered: f64) -> Self {
        Self {
            percent_covered,
            percent_remembered,
            session_id: None,
            day_index: None,
            scheduled_for: None,
            created_at: None,
        }
    }
}

/// Solo history of a topic as returned by the backend, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSnapshot {
    #[serde(default)]
    pub metrics: Vec<SoloMetric>,
    #[serde(default)]
    pub suggestion: String,
}

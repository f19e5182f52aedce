//! crates/tracker_core/src/lifecycle.rs
//!
//! The session status state machine and the reschedule rules.
//!
//! `scheduled` is the only state that accepts actions. `completed` and `skipped`
//! are terminal and read-only; rescheduling moves the date but keeps the status.

use chrono::NaiveDate;

use crate::domain::{Mode, Session, SessionId, SessionStatus, Topic, TopicId};
use crate::route::Route;

//=========================================================================================
// Actions
//=========================================================================================

/// A user action offered on a session row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Open,
    Reschedule,
    Complete,
    Skip,
}

impl SessionAction {
    pub const ALL: [SessionAction; 4] = [
        SessionAction::Open,
        SessionAction::Reschedule,
        SessionAction::Complete,
        SessionAction::Skip,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::Open => "Open",
            SessionAction::Reschedule => "Reschedule",
            SessionAction::Complete => "Complete",
            SessionAction::Skip => "Skip",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("Session {session} is {status} and can no longer be changed")]
    Terminal { session: SessionId, status: SessionStatus },
    #[error("Session {0} is not part of this topic")]
    UnknownSession(SessionId),
    #[error("Topic {0} has not been loaded yet")]
    TopicNotLoaded(TopicId),
}

/// The actions offered for a session in `status`: all of them while scheduled,
/// none once terminal.
pub fn available_actions(status: SessionStatus) -> &'static [SessionAction] {
    match status {
        SessionStatus::Scheduled => &SessionAction::ALL,
        SessionStatus::Completed | SessionStatus::Skipped => &[],
    }
}

/// Checks that `action` may be taken on `session`.
pub fn ensure_actionable(session: &Session, action: SessionAction) -> Result<(), LifecycleError> {
    if available_actions(session.status).contains(&action) {
        Ok(())
    } else {
        Err(LifecycleError::Terminal {
            session: session.id,
            status: session.status,
        })
    }
}

impl SessionStatus {
    /// The status a session ends up in after `action` succeeds.
    pub fn apply(self, action: SessionAction) -> Result<SessionStatus, SessionStatus> {
        if self.is_terminal() {
            return Err(self);
        }
        Ok(match action {
            SessionAction::Open | SessionAction::Reschedule => SessionStatus::Scheduled,
            SessionAction::Complete => SessionStatus::Completed,
            SessionAction::Skip => SessionStatus::Skipped,
        })
    }
}

/// The screen that reviews `session`, chosen by the owning topic's mode.
pub fn open_route(topic: &Topic, session: &Session) -> Result<Route, LifecycleError> {
    ensure_actionable(session, SessionAction::Open)?;
    Ok(match topic.mode {
        Mode::Automated => Route::AutomatedSession { session: session.id },
        Mode::Solo => Route::SoloSession {
            session: session.id,
            topic: Some(topic.id),
        },
    })
}

//=========================================================================================
// Reschedule Rules
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RescheduleError {
    #[error("Pick a date to reschedule to")]
    Missing,
    #[error("'{0}' is not a date (expected YYYY-MM-DD)")]
    Invalid(String),
    #[error("{date} is in the past; pick {today} or later")]
    InPast { date: NaiveDate, today: NaiveDate },
}

/// Parses a reschedule target and checks it is `today` or later.
pub fn validate_reschedule(input: &str, today: NaiveDate) -> Result<NaiveDate, RescheduleError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(RescheduleError::Missing);
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| RescheduleError::Invalid(input.to_string()))?;
    if date < today {
        return Err(RescheduleError::InPast { date, today });
    }
    Ok(date)
}

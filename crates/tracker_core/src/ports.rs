//! crates/tracker_core/src/ports.rs
//!
//! Defines the service contracts (traits) the client is built against.
//! The views only ever talk to these traits, so the concrete HTTP adapter and
//! the identity provider integration can be swapped out in tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    ComparisonResult, NewTopic, Session, SessionId, SoloMetric, Topic, TopicId, TrendSnapshot,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortError {
    /// The backend answered with a non-2xx status.
    #[error("Request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("Transport failure: {0}")]
    Transport(String),
    /// A response arrived but could not be understood.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The backend's `detail` message, if it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            PortError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The message to show the user: the backend detail verbatim, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Failure to obtain an access token from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("No access token available")]
    Missing,
    #[error("Identity provider error: {0}")]
    Provider(String),
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The backend REST contract consumed by the client.
#[async_trait]
pub trait TrackerApi: Send + Sync {
    // --- Topics ---
    async fn list_topics(&self) -> PortResult<Vec<Topic>>;

    async fn get_topic(&self, topic_id: TopicId) -> PortResult<Topic>;

    async fn create_topic(&self, topic: &NewTopic) -> PortResult<Topic>;

    async fn list_sessions(&self, topic_id: TopicId) -> PortResult<Vec<Session>>;

    async fn solo_trend(&self, topic_id: TopicId) -> PortResult<TrendSnapshot>;

    // --- Automated Sessions ---

    /// Replaces the notes stored for `session_id`; resubmitting is safe.
    async fn submit_notes(&self, session_id: SessionId, points: &[String]) -> PortResult<()>;

    async fn compare(&self, session_id: SessionId) -> PortResult<ComparisonResult>;

    // --- Solo Sessions ---
    async fn submit_solo_metric(&self, session_id: SessionId, metric: &SoloMetric)
        -> PortResult<()>;

    // --- Session Lifecycle ---
    async fn reschedule(&self, session_id: SessionId, scheduled_for: NaiveDate) -> PortResult<()>;

    async fn complete(&self, session_id: SessionId) -> PortResult<()>;

    async fn skip(&self, session_id: SessionId) -> PortResult<()>;
}

/// The capability pair the client needs from the identity provider.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Whether a user is currently logged in.
    fn is_authenticated(&self) -> bool;

    /// Retrieves a fresh bearer token for the next request.
    async fn access_token(&self) -> Result<String, TokenError>;

    /// Ends the identity provider session.
    async fn logout(&self) -> Result<(), TokenError>;
}

//! services/client/src/views/automated.rs
//!
//! The automated review: collect bullet points, submit them, ask the backend
//! to compare them with earlier notes and show the verdict.

use std::sync::Arc;

use tracing::{error, info};
use tracker_core::display::ComparisonDisplay;
use tracker_core::domain::{ComparisonResult, SessionId};
use tracker_core::notes::NoteSubmission;
use tracker_core::ports::{PortResult, TrackerApi};

use super::{Outcome, ViewHandle, ViewLifetime};

pub struct AutomatedSessionView {
    api: Arc<dyn TrackerApi>,
    lifetime: ViewLifetime,
    session_id: SessionId,
    pub notes: NoteSubmission,
    pub result: Option<ComparisonResult>,
    pub error: Option<String>,
    pub submitting: bool,
}

impl AutomatedSessionView {
    pub fn new(api: Arc<dyn TrackerApi>, session_id: SessionId) -> Self {
        Self {
            api,
            lifetime: ViewLifetime::new(),
            session_id,
            notes: NoteSubmission::new(),
            result: None,
            error: None,
            submitting: false,
        }
    }

    pub fn handle(&self) -> ViewHandle {
        self.lifetime.handle()
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn add_point(&mut self, text: &str) -> bool {
        self.notes.add(text)
    }

    pub fn remove_point(&mut self, index: usize) -> Option<String> {
        self.notes.remove(index)
    }

    /// Whether the "Submit & Compare" control is enabled.
    pub fn can_submit(&self) -> bool {
        self.notes.can_submit() && !self.submitting
    }

    pub fn display(&self) -> Option<ComparisonDisplay> {
        self.result.as_ref().map(ComparisonDisplay::from_result)
    }

    /// Submits the notes, then requests the comparison.
    ///
    /// Both calls must succeed before a result is shown. On any failure the
    /// points stay in place so the user can retry without retyping them.
    pub async fn submit(&mut self) -> Outcome {
        if self.submitting {
            return Outcome::Busy;
        }
        let points = match self.notes.ready() {
            Ok(points) => points.to_vec(),
            Err(e) => {
                self.error = Some(e.to_string());
                return Outcome::Invalid;
            }
        };

        self.submitting = true;
        self.error = None;
        let result = self.submit_and_compare(&points).await;
        if !self.lifetime.still_active("compare notes") {
            return Outcome::Discarded;
        }
        self.submitting = false;

        match result {
            Ok(comparison) => {
                info!(
                    "Session {} compared: recall {:.1}%, {} missed",
                    self.session_id,
                    comparison.recall_score,
                    comparison.missed_points.len()
                );
                self.result = Some(comparison);
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to compare notes for session {}: {:?}", self.session_id, e);
                self.result = None;
                self.error = Some(e.user_message("Failed to compare notes"));
                Outcome::Failed
            }
        }
    }

    async fn submit_and_compare(&self, points: &[String]) -> PortResult<ComparisonResult> {
        self.api.submit_notes(self.session_id, points).await?;
        self.api.compare(self.session_id).await
    }
}

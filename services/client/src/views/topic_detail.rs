//! services/client/src/views/topic_detail.rs
//!
//! A topic with its review sessions, and the session lifecycle actions.
//!
//! Every successful action refetches the whole session list; the list is never
//! patched locally. A failed action leaves the list exactly as it was and raises
//! a blocking alert instead.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info, warn};
use tracker_core::domain::{Session, SessionId, SessionStatus, Topic, TopicId};
use tracker_core::lifecycle::{
    available_actions, ensure_actionable, open_route, validate_reschedule, LifecycleError,
    SessionAction,
};
use tracker_core::ports::{PortResult, TrackerApi};
use tracker_core::route::Route;

use super::{Outcome, ViewHandle, ViewLifetime};

/// The inline date editor shown under one session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleForm {
    pub session: SessionId,
    pub date: String,
    pub error: Option<String>,
}

/// The two actions that end a session.
#[derive(Debug, Clone, Copy)]
enum Finish {
    Complete,
    Skip,
}

impl Finish {
    fn action(self) -> SessionAction {
        match self {
            Finish::Complete => SessionAction::Complete,
            Finish::Skip => SessionAction::Skip,
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            Finish::Complete => "Failed to complete session",
            Finish::Skip => "Failed to skip session",
        }
    }
}

pub struct TopicDetailView {
    api: Arc<dyn TrackerApi>,
    lifetime: ViewLifetime,
    topic_id: TopicId,
    pub topic: Option<Topic>,
    pub sessions: Vec<Session>,
    pub loading: bool,
    /// Inline error of the last load.
    pub error: Option<String>,
    /// Blocking alert raised by a failed lifecycle action.
    pub alert: Option<String>,
    pub reschedule: Option<RescheduleForm>,
    /// The action currently waiting on the backend; its control is disabled.
    pub pending: Option<(SessionId, SessionAction)>,
}

impl TopicDetailView {
    pub fn new(api: Arc<dyn TrackerApi>, topic_id: TopicId) -> Self {
        Self {
            api,
            lifetime: ViewLifetime::new(),
            topic_id,
            topic: None,
            sessions: Vec::new(),
            loading: false,
            error: None,
            alert: None,
            reschedule: None,
            pending: None,
        }
    }

    pub fn handle(&self) -> ViewHandle {
        self.lifetime.handle()
    }

    pub fn topic_id(&self) -> TopicId {
        self.topic_id
    }

    //=====================================================================================
    // Loading
    //=====================================================================================

    /// Fetches the topic and its sessions together. On failure the previous
    /// snapshot stays on screen.
    pub async fn load(&mut self) -> Outcome {
        self.loading = true;
        let result: PortResult<(Topic, Vec<Session>)> = futures::try_join!(
            self.api.get_topic(self.topic_id),
            self.api.list_sessions(self.topic_id)
        );
        if !self.lifetime.still_active("load topic") {
            return Outcome::Discarded;
        }
        self.loading = false;

        match result {
            Ok((topic, sessions)) => {
                self.topic = Some(topic);
                self.sessions = sessions;
                self.error = None;
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to load topic {}: {:?}", self.topic_id, e);
                self.error = Some(e.user_message("Failed to load topic"));
                Outcome::Failed
            }
        }
    }

    //=====================================================================================
    // Session Rows
    //=====================================================================================

    pub fn session(&self, session_id: SessionId) -> Result<&Session, LifecycleError> {
        self.sessions
            .iter()
            .find(|s| s.id == session_id)
            .ok_or(LifecycleError::UnknownSession(session_id))
    }

    /// The buttons rendered for a row, minus the one whose call is in flight.
    pub fn actions_for(&self, session: &Session) -> Vec<SessionAction> {
        available_actions(session.status)
            .iter()
            .copied()
            .filter(|action| self.pending != Some((session.id, *action)))
            .collect()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// The route that reviews a scheduled session, carrying this topic's id.
    pub fn open(&self, session_id: SessionId) -> Result<Route, LifecycleError> {
        let topic = self
            .topic
            .as_ref()
            .ok_or(LifecycleError::TopicNotLoaded(self.topic_id))?;
        open_route(topic, self.session(session_id)?)
    }

    //=====================================================================================
    // Reschedule
    //=====================================================================================

    pub fn begin_reschedule(&mut self, session_id: SessionId) -> Result<(), LifecycleError> {
        ensure_actionable(self.session(session_id)?, SessionAction::Reschedule)?;
        self.reschedule = Some(RescheduleForm {
            session: session_id,
            date: String::new(),
            error: None,
        });
        Ok(())
    }

    pub fn set_reschedule_date(&mut self, date: &str) {
        if let Some(form) = self.reschedule.as_mut() {
            form.date = date.to_string();
            form.error = None;
        }
    }

    pub fn cancel_reschedule(&mut self) {
        self.reschedule = None;
    }

    /// Saves the open reschedule form. The form stays open on any failure so the
    /// user can retry.
    pub async fn save_reschedule(&mut self, today: NaiveDate) -> Result<Outcome, LifecycleError> {
        let Some(form) = self.reschedule.clone() else {
            return Ok(Outcome::Invalid);
        };
        ensure_actionable(self.session(form.session)?, SessionAction::Reschedule)?;
        if self.pending.is_some() {
            return Ok(Outcome::Busy);
        }

        let date = match validate_reschedule(&form.date, today) {
            Ok(date) => date,
            Err(e) => {
                if let Some(open) = self.reschedule.as_mut() {
                    open.error = Some(e.to_string());
                }
                return Ok(Outcome::Invalid);
            }
        };

        self.pending = Some((form.session, SessionAction::Reschedule));
        let result = self.api.reschedule(form.session, date).await;
        if !self.lifetime.still_active("reschedule") {
            return Ok(Outcome::Discarded);
        }
        self.pending = None;

        match result {
            Ok(()) => {
                info!("Session {} rescheduled to {}", form.session, date);
                self.reschedule = None;
                Ok(self.refresh_after(form.session, SessionAction::Reschedule).await)
            }
            Err(e) => {
                error!("Failed to reschedule session {}: {:?}", form.session, e);
                self.alert = Some(e.user_message("Failed to reschedule"));
                Ok(Outcome::Failed)
            }
        }
    }

    //=====================================================================================
    // Complete / Skip
    //=====================================================================================

    pub async fn complete(&mut self, session_id: SessionId) -> Result<Outcome, LifecycleError> {
        self.finish(session_id, Finish::Complete).await
    }

    pub async fn skip(&mut self, session_id: SessionId) -> Result<Outcome, LifecycleError> {
        self.finish(session_id, Finish::Skip).await
    }

    async fn finish(&mut self, session_id: SessionId, finish: Finish) -> Result<Outcome, LifecycleError> {
        let action = finish.action();
        ensure_actionable(self.session(session_id)?, action)?;
        if self.pending.is_some() {
            return Ok(Outcome::Busy);
        }

        self.pending = Some((session_id, action));
        let result = match finish {
            Finish::Complete => self.api.complete(session_id).await,
            Finish::Skip => self.api.skip(session_id).await,
        };
        if !self.lifetime.still_active(action.label()) {
            return Ok(Outcome::Discarded);
        }
        self.pending = None;

        match result {
            Ok(()) => {
                info!("Session {}: {} succeeded", session_id, action.label());
                Ok(self.refresh_after(session_id, action).await)
            }
            Err(e) => {
                error!("{} of session {} failed: {:?}", action.label(), session_id, e);
                self.alert = Some(e.user_message(finish.fallback()));
                Ok(Outcome::Failed)
            }
        }
    }

    /// Refetches after a successful action and warns if the backend's status
    /// is not the one the action should have produced. The action stays applied
    /// when only the refetch fails; that case yields `Stale`.
    async fn refresh_after(&mut self, session_id: SessionId, action: SessionAction) -> Outcome {
        let outcome = match self.load().await {
            Outcome::Failed => {
                warn!("Session {} {} applied, but the reload failed", session_id, action.label());
                Outcome::Stale
            }
            other => other,
        };
        if outcome == Outcome::Applied {
            if let Ok(session) = self.session(session_id) {
                let expected = SessionStatus::Scheduled.apply(action).ok();
                if expected != Some(session.status) {
                    warn!(
                        "Session {} is {} after {}; expected {:?}",
                        session_id,
                        session.status,
                        action.label(),
                        expected
                    );
                }
            }
        }
        outcome
    }
}

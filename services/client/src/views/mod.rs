//! services/client/src/views/mod.rs
//!
//! The screens of the client. Each view owns the state it renders, fetches
//! fresh data from the `TrackerApi` it was constructed with and keeps nothing
//! once it is dropped.

pub mod automated;
pub mod create_topic;
pub mod dashboard;
pub mod render;
pub mod solo;
pub mod topic_detail;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracker_core::ports::TrackerApi;
use tracker_core::route::Route;

pub use automated::AutomatedSessionView;
pub use create_topic::CreateTopicView;
pub use dashboard::DashboardView;
pub use solo::{SoloPhase, SoloSessionView};
pub use topic_detail::{RescheduleForm, TopicDetailView};

//=========================================================================================
// Outcomes
//=========================================================================================

/// What happened to a view after one of its async actions returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The backend answered and the view now shows the new data.
    Applied,
    /// The backend rejected the call; the view shows the error message.
    Failed,
    /// The backend applied the change but the reload after it failed. The view
    /// keeps its previous data and shows the reload error.
    Stale,
    /// Local validation failed; nothing was sent.
    Invalid,
    /// The control was still waiting on its previous call; nothing was sent.
    Busy,
    /// The view was left before the answer arrived; the answer was dropped.
    Discarded,
}

//=========================================================================================
// View Lifetime
//=========================================================================================

/// Tracks whether a view is still on screen.
///
/// In-flight calls are never aborted. Instead every view checks its lifetime
/// after each await and drops results that arrive once it has been left.
#[derive(Debug, Clone, Default)]
pub struct ViewLifetime {
    token: CancellationToken,
}

/// The navigator's side of a `ViewLifetime`.
#[derive(Debug, Clone)]
pub struct ViewHandle {
    token: CancellationToken,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ViewHandle {
        ViewHandle {
            token: self.token.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Like `is_active`, but logs the dropped result.
    pub(crate) fn still_active(&self, what: &str) -> bool {
        let active = self.is_active();
        if !active {
            debug!("View closed before {} returned; discarding the result.", what);
        }
        active
    }
}

impl ViewHandle {
    pub fn deactivate(&self) {
        self.token.cancel();
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }
}

//=========================================================================================
// Any View
//=========================================================================================

/// One of the screens, built for a route.
pub enum View {
    Dashboard(DashboardView),
    CreateTopic(CreateTopicView),
    TopicDetail(TopicDetailView),
    Automated(AutomatedSessionView),
    Solo(SoloSessionView),
}

impl View {
    /// Builds the view for `route`. Nothing is fetched until the view is loaded.
    pub fn build(api: Arc<dyn TrackerApi>, route: &Route) -> Self {
        match route {
            Route::Dashboard => View::Dashboard(DashboardView::new(api)),
            Route::CreateTopic => View::CreateTopic(CreateTopicView::new(api)),
            Route::TopicDetail { topic } => View::TopicDetail(TopicDetailView::new(api, *topic)),
            Route::AutomatedSession { session } => {
                View::Automated(AutomatedSessionView::new(api, *session))
            }
            Route::SoloSession { session, topic } => {
                View::Solo(SoloSessionView::new(api, *session, *topic))
            }
        }
    }

    pub fn handle(&self) -> ViewHandle {
        match self {
            View::Dashboard(v) => v.handle(),
            View::CreateTopic(v) => v.handle(),
            View::TopicDetail(v) => v.handle(),
            View::Automated(v) => v.handle(),
            View::Solo(v) => v.handle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deactivating_the_handle_ends_the_lifetime() {
        let lifetime = ViewLifetime::new();
        let handle = lifetime.handle();
        assert!(lifetime.is_active());
        handle.deactivate();
        assert!(!lifetime.is_active());
        assert!(!handle.is_active());
        assert!(!lifetime.still_active("test"));
    }
}

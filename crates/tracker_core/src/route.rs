//! crates/tracker_core/src/route.rs
//!
//! The screens of the client and the explicit context each one needs.

use std::fmt;

use crate::domain::{SessionId, TopicId};

/// A navigable screen, carrying every id the screen needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    CreateTopic,
    TopicDetail { topic: TopicId },
    AutomatedSession { session: SessionId },
    /// `topic` is optional: without it the view simply shows no trend.
    SoloSession { session: SessionId, topic: Option<TopicId> },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Dashboard => write!(f, "/"),
            Route::CreateTopic => write!(f, "/topics/new"),
            Route::TopicDetail { topic } => write!(f, "/topics/{}", topic),
            Route::AutomatedSession { session } => write!(f, "/sessions/{}/automated", session),
            Route::SoloSession { session, .. } => write!(f, "/sessions/{}/solo", session),
        }
    }
}

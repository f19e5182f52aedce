//! services/client/src/views/create_topic.rs
//!
//! The form that creates a topic. The backend generates its review schedule.

use std::sync::Arc;

use tracing::{error, info};
use tracker_core::domain::{Mode, Topic};
use tracker_core::ports::TrackerApi;
use tracker_core::route::Route;
use tracker_core::validation::validate_new_topic;

use super::{Outcome, ViewHandle, ViewLifetime};

pub struct CreateTopicView {
    api: Arc<dyn TrackerApi>,
    lifetime: ViewLifetime,
    pub title: String,
    pub description: String,
    pub mode: Mode,
    pub submitting: bool,
    pub error: Option<String>,
    pub created: Option<Topic>,
}

impl CreateTopicView {
    pub fn new(api: Arc<dyn TrackerApi>) -> Self {
        Self {
            api,
            lifetime: ViewLifetime::new(),
            title: String::new(),
            description: String::new(),
            mode: Mode::Automated,
            submitting: false,
            error: None,
            created: None,
        }
    }

    pub fn handle(&self) -> ViewHandle {
        self.lifetime.handle()
    }

    pub async fn submit(&mut self) -> Outcome {
        if self.submitting {
            return Outcome::Busy;
        }
        let topic = match validate_new_topic(&self.title, &self.description, self.mode) {
            Ok(topic) => topic,
            Err(e) => {
                self.error = Some(e.to_string());
                return Outcome::Invalid;
            }
        };

        self.submitting = true;
        self.error = None;
        let result = self.api.create_topic(&topic).await;
        if !self.lifetime.still_active("create topic") {
            return Outcome::Discarded;
        }
        self.submitting = false;

        match result {
            Ok(created) => {
                info!("Created topic {} ({})", created.id, created.mode);
                self.created = Some(created);
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to create topic: {:?}", e);
                self.error = Some(e.user_message("Failed to create topic"));
                Outcome::Failed
            }
        }
    }

    /// After a successful create the user goes back to the dashboard.
    pub fn next_route(&self) -> Option<Route> {
        self.created.as_ref().map(|_| Route::Dashboard)
    }
}

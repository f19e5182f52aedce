//! services/client/src/views/dashboard.rs
//!
//! The landing screen: the user's topics.

use std::sync::Arc;

use tracing::error;
use tracker_core::domain::Topic;
use tracker_core::ports::TrackerApi;
use tracker_core::route::Route;

use super::{Outcome, ViewHandle, ViewLifetime};

pub struct DashboardView {
    api: Arc<dyn TrackerApi>,
    lifetime: ViewLifetime,
    pub topics: Vec<Topic>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardView {
    pub fn new(api: Arc<dyn TrackerApi>) -> Self {
        Self {
            api,
            lifetime: ViewLifetime::new(),
            topics: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn handle(&self) -> ViewHandle {
        self.lifetime.handle()
    }

    pub async fn load(&mut self) -> Outcome {
        self.loading = true;
        let result = self.api.list_topics().await;
        if !self.lifetime.still_active("list topics") {
            return Outcome::Discarded;
        }
        self.loading = false;

        match result {
            Ok(topics) => {
                self.topics = topics;
                self.error = None;
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to load topics: {:?}", e);
                self.error = Some(e.user_message("Failed to load topics"));
                Outcome::Failed
            }
        }
    }

    /// Where the "View" link of a topic leads.
    pub fn topic_route(&self, topic: &Topic) -> Route {
        Route::TopicDetail { topic: topic.id }
    }
}

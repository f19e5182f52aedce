//! services/client/src/views/solo.rs
//!
//! The solo review: the user reports how much they covered and remembered,
//! then sees the topic's trend and the backend's suggestion.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracker_core::display::TrendChart;
use tracker_core::domain::{SessionId, TopicId, TrendSnapshot};
use tracker_core::ports::TrackerApi;
use tracker_core::validation::validate_solo;

use super::{Outcome, ViewHandle, ViewLifetime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoloPhase {
    Editing,
    /// Terminal: the metric was accepted and cannot be withdrawn.
    Submitted,
}

pub struct SoloSessionView {
    api: Arc<dyn TrackerApi>,
    lifetime: ViewLifetime,
    session_id: SessionId,
    topic_id: Option<TopicId>,
    pub covered: String,
    pub remembered: String,
    pub phase: SoloPhase,
    pub submitting: bool,
    pub error: Option<String>,
    pub trend: Option<TrendSnapshot>,
}

impl SoloSessionView {
    pub fn new(api: Arc<dyn TrackerApi>, session_id: SessionId, topic_id: Option<TopicId>) -> Self {
        Self {
            api,
            lifetime: ViewLifetime::new(),
            session_id,
            topic_id,
            covered: String::new(),
            remembered: String::new(),
            phase: SoloPhase::Editing,
            submitting: false,
            error: None,
            trend: None,
        }
    }

    pub fn handle(&self) -> ViewHandle {
        self.lifetime.handle()
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn topic_id(&self) -> Option<TopicId> {
        self.topic_id
    }

    /// Loads the trend when the view has a topic to ask about.
    pub async fn mount(&mut self) -> Outcome {
        self.fetch_trend().await
    }

    /// The trend is optional. Without a topic id nothing is requested, and a
    /// failed request only gets logged.
    async fn fetch_trend(&mut self) -> Outcome {
        let Some(topic_id) = self.topic_id else {
            return Outcome::Applied;
        };
        let result = self.api.solo_trend(topic_id).await;
        if !self.lifetime.still_active("solo trend") {
            return Outcome::Discarded;
        }
        match result {
            Ok(trend) => {
                self.trend = Some(trend);
                Outcome::Applied
            }
            Err(e) => {
                warn!("Failed to load trend for topic {}: {:?}", topic_id, e);
                Outcome::Failed
            }
        }
    }

    /// Validates and submits the metric, then refetches the trend so the new
    /// point comes from the backend.
    pub async fn submit(&mut self) -> Outcome {
        if self.submitting {
            return Outcome::Busy;
        }
        if self.phase == SoloPhase::Submitted {
            return Outcome::Invalid;
        }
        let metric = match validate_solo(&self.covered, &self.remembered) {
            Ok(metric) => metric,
            Err(e) => {
                self.error = Some(e.to_string());
                return Outcome::Invalid;
            }
        };

        self.submitting = true;
        self.error = None;
        let result = self.api.submit_solo_metric(self.session_id, &metric).await;
        if !self.lifetime.still_active("submit metrics") {
            return Outcome::Discarded;
        }
        self.submitting = false;

        match result {
            Ok(()) => {
                info!(
                    "Session {} metrics submitted: covered {}%, remembered {}%",
                    self.session_id, metric.percent_covered, metric.percent_remembered
                );
                self.phase = SoloPhase::Submitted;
                if self.fetch_trend().await == Outcome::Discarded {
                    return Outcome::Discarded;
                }
                Outcome::Applied
            }
            Err(e) => {
                error!("Failed to submit metrics for session {}: {:?}", self.session_id, e);
                self.error = Some(e.user_message("Failed to submit metrics"));
                Outcome::Failed
            }
        }
    }

    pub fn chart(&self) -> Option<TrendChart> {
        self.trend.as_ref().map(TrendChart::from_snapshot)
    }
}

//! services/client/src/adapters/http.rs
//!
//! This module contains the HTTP adapter, which is the concrete implementation
//! of the `TrackerApi` port from the `core` crate. It talks to the tracker
//! backend's REST API using `reqwest`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};
use tracker_core::domain::{
    ComparisonResult, NewTopic, Session, SessionId, SoloMetric, Topic, TopicId, TrendSnapshot,
};
use tracker_core::ports::{PortError, PortResult, TokenProvider, TrackerApi};

use crate::config::Config;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TrackerApi` over HTTP.
///
/// Built once, after login, and shared by every view. Each request goes through
/// `authorize`, which asks the token provider for a fresh bearer token.
#[derive(Clone)]
pub struct HttpApiAdapter {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpApiAdapter {
    /// Creates a new `HttpApiAdapter`. No request timeout is configured.
    pub fn new(config: &Config, tokens: Arc<dyn TokenProvider>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The outbound request hook.
    ///
    /// A token failure never blocks the request: it goes out unauthenticated and
    /// the backend decides what to do with it.
    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.access_token().await {
            Ok(token) => builder.bearer_auth(token),
            Err(e) => {
                warn!("Failed to get access token, sending request without it: {}", e);
                builder
            }
        }
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Body<'_>>) -> PortResult<Response> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut builder = self.client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let builder = self.authorize(builder).await;

        let response = builder
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = extract_detail(&text);
        debug!("{} rejected with {}: {:?}", url, status, detail);
        Err(PortError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Body<'_>>,
    ) -> PortResult<T> {
        self.send(method, path, body)
            .await?
            .json::<T>()
            .await
            .map_err(|e| PortError::Unexpected(format!("Malformed response from {}: {}", path, e)))
    }
}

//=========================================================================================
// Wire Payloads
//=========================================================================================

/// Request bodies sent by the adapter.
#[derive(Serialize)]
#[serde(untagged)]
enum Body<'a> {
    Topic(&'a NewTopic),
    Notes { points: &'a [String] },
    Metric {
        percent_covered: f64,
        percent_remembered: f64,
    },
    Reschedule { scheduled_for: NaiveDate },
    Empty {},
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Pulls the conventional `{"detail": "..."}` message out of an error body.
/// Anything else (HTML, validation lists, empty bodies) yields `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) => Some(detail),
        _ => None,
    }
}

//=========================================================================================
// `TrackerApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl TrackerApi for HttpApiAdapter {
    async fn list_topics(&self) -> PortResult<Vec<Topic>> {
        self.fetch(Method::GET, "/topics", None).await
    }

    async fn get_topic(&self, topic_id: TopicId) -> PortResult<Topic> {
        self.fetch(Method::GET, &format!("/topics/{}", topic_id), None).await
    }

    async fn create_topic(&self, topic: &NewTopic) -> PortResult<Topic> {
        self.fetch(Method::POST, "/topics", Some(&Body::Topic(topic))).await
    }

    async fn list_sessions(&self, topic_id: TopicId) -> PortResult<Vec<Session>> {
        self.fetch(Method::GET, &format!("/topics/{}/sessions", topic_id), None)
            .await
    }

    async fn solo_trend(&self, topic_id: TopicId) -> PortResult<TrendSnapshot> {
        self.fetch(Method::GET, &format!("/topics/{}/solo/trend", topic_id), None)
            .await
    }

    async fn submit_notes(&self, session_id: SessionId, points: &[String]) -> PortResult<()> {
        let body = Body::Notes { points };
        self.send(Method::POST, &format!("/sessions/{}/notes", session_id), Some(&body))
            .await?;
        Ok(())
    }

    async fn compare(&self, session_id: SessionId) -> PortResult<ComparisonResult> {
        self.fetch(
            Method::POST,
            &format!("/sessions/{}/compare", session_id),
            Some(&Body::Empty {}),
        )
        .await
    }

    async fn submit_solo_metric(
        &self,
        session_id: SessionId,
        metric: &SoloMetric,
    ) -> PortResult<()> {
        let body = Body::Metric {
            percent_covered: metric.percent_covered,
            percent_remembered: metric.percent_remembered,
        };
        self.send(Method::POST, &format!("/sessions/{}/solo", session_id), Some(&body))
            .await?;
        Ok(())
    }

    async fn reschedule(&self, session_id: SessionId, scheduled_for: NaiveDate) -> PortResult<()> {
        let body = Body::Reschedule { scheduled_for };
        self.send(
            Method::PATCH,
            &format!("/sessions/{}/reschedule", session_id),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    async fn complete(&self, session_id: SessionId) -> PortResult<()> {
        self.send(Method::POST, &format!("/sessions/{}/complete", session_id), None)
            .await?;
        Ok(())
    }

    async fn skip(&self, session_id: SessionId) -> PortResult<()> {
        self.send(Method::POST, &format!("/sessions/{}/skip", session_id), None)
            .await?;
        Ok(())
    }
}

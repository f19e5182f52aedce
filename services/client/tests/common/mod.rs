//! Shared test doubles: an in-memory `TrackerApi` and an in-process HTTP
//! backend that records every request it receives.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tokio::sync::Notify;
use tracker_core::domain::{
    ComparisonResult, Mode, NewTopic, Session, SessionId, SessionStatus, SoloMetric, Topic,
    TopicId, TrendSnapshot,
};
use tracker_core::ports::{PortError, PortResult, TrackerApi};

//=========================================================================================
// Fixtures
//=========================================================================================

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn topic(id: i64, mode: Mode) -> Topic {
    Topic {
        id: TopicId(id),
        title: format!("Topic {}", id),
        description: "Spaced review".to_string(),
        mode,
    }
}

pub fn session(id: i64, day_index: u32, status: SessionStatus) -> Session {
    Session {
        id: SessionId(id),
        topic_id: Some(TopicId(1)),
        day_index,
        scheduled_for: today() + chrono::Duration::days(day_index as i64),
        status,
    }
}

pub fn rejected(detail: &str) -> PortError {
    PortError::Rejected {
        status: 400,
        detail: Some(detail.to_string()),
    }
}

//=========================================================================================
// In-Memory API
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListTopics,
    GetTopic(TopicId),
    CreateTopic(NewTopic),
    ListSessions(TopicId),
    SoloTrend(TopicId),
    SubmitNotes(SessionId, Vec<String>),
    Compare(SessionId),
    SubmitSolo(SessionId, f64, f64),
    Reschedule(SessionId, NaiveDate),
    Complete(SessionId),
    Skip(SessionId),
}

/// A `TrackerApi` that behaves like a tiny backend and records every call.
#[derive(Default)]
pub struct ScriptedApi {
    calls: Mutex<Vec<Call>>,
    pub topics: Mutex<Vec<Topic>>,
    pub sessions: Mutex<Vec<Session>>,
    pub trend: Mutex<Option<TrendSnapshot>>,
    pub comparison: Mutex<Option<ComparisonResult>>,
    failures: Mutex<HashMap<&'static str, PortError>>,
    holds: Mutex<HashMap<&'static str, Arc<Notify>>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_topic(topic: Topic, sessions: Vec<Session>) -> Arc<Self> {
        let api = Self::default();
        *api.topics.lock().unwrap() = vec![topic];
        *api.sessions.lock().unwrap() = sessions;
        Arc::new(api)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Makes every later call of `op` fail with `error`.
    pub fn fail(&self, op: &'static str, error: PortError) {
        self.failures.lock().unwrap().insert(op, error);
    }

    pub fn heal(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    /// Makes `op` wait until the returned `Notify` is signalled.
    pub fn hold(&self, op: &'static str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.holds.lock().unwrap().insert(op, notify.clone());
        notify
    }

    async fn enter(&self, op: &'static str, call: Call) -> PortResult<()> {
        self.calls.lock().unwrap().push(call);
        let hold = self.holds.lock().unwrap().get(op).cloned();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        match self.failures.lock().unwrap().get(op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn set_status(&self, session_id: SessionId, status: SessionStatus) {
        for s in self.sessions.lock().unwrap().iter_mut() {
            if s.id == session_id {
                s.status = status;
            }
        }
    }
}

fn not_found(what: &str) -> PortError {
    PortError::Rejected {
        status: 404,
        detail: Some(format!("{} not found", what)),
    }
}

#[async_trait]
impl TrackerApi for ScriptedApi {
    async fn list_topics(&self) -> PortResult<Vec<Topic>> {
        self.enter("list_topics", Call::ListTopics).await?;
        Ok(self.topics.lock().unwrap().clone())
    }

    async fn get_topic(&self, topic_id: TopicId) -> PortResult<Topic> {
        self.enter("get_topic", Call::GetTopic(topic_id)).await?;
        self.topics
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == topic_id)
            .cloned()
            .ok_or_else(|| not_found("Topic"))
    }

    async fn create_topic(&self, topic: &NewTopic) -> PortResult<Topic> {
        self.enter("create_topic", Call::CreateTopic(topic.clone())).await?;
        let mut topics = self.topics.lock().unwrap();
        let created = Topic {
            id: TopicId(topics.len() as i64 + 1),
            title: topic.title.clone(),
            description: topic.description.clone(),
            mode: topic.mode,
        };
        topics.push(created.clone());
        Ok(created)
    }

    async fn list_sessions(&self, topic_id: TopicId) -> PortResult<Vec<Session>> {
        self.enter("list_sessions", Call::ListSessions(topic_id)).await?;
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn solo_trend(&self, topic_id: TopicId) -> PortResult<TrendSnapshot> {
        self.enter("solo_trend", Call::SoloTrend(topic_id)).await?;
        self.trend.lock().unwrap().clone().ok_or_else(|| not_found("Trend"))
    }

    async fn submit_notes(&self, session_id: SessionId, points: &[String]) -> PortResult<()> {
        self.enter("submit_notes", Call::SubmitNotes(session_id, points.to_vec()))
            .await
    }

    async fn compare(&self, session_id: SessionId) -> PortResult<ComparisonResult> {
        self.enter("compare", Call::Compare(session_id)).await?;
        self.comparison
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| not_found("Comparison"))
    }

    async fn submit_solo_metric(
        &self,
        session_id: SessionId,
        metric: &SoloMetric,
    ) -> PortResult<()> {
        let call = Call::SubmitSolo(session_id, metric.percent_covered, metric.percent_remembered);
        self.enter("submit_solo_metric", call).await?;
        if let Some(trend) = self.trend.lock().unwrap().as_mut() {
            trend
                .metrics
                .insert(0, SoloMetric::new(metric.percent_covered, metric.percent_remembered));
        }
        Ok(())
    }

    async fn reschedule(&self, session_id: SessionId, scheduled_for: NaiveDate) -> PortResult<()> {
        self.enter("reschedule", Call::Reschedule(session_id, scheduled_for))
            .await?;
        for s in self.sessions.lock().unwrap().iter_mut() {
            if s.id == session_id {
                s.scheduled_for = scheduled_for;
            }
        }
        Ok(())
    }

    async fn complete(&self, session_id: SessionId) -> PortResult<()> {
        self.enter("complete", Call::Complete(session_id)).await?;
        self.set_status(session_id, SessionStatus::Completed);
        Ok(())
    }

    async fn skip(&self, session_id: SessionId) -> PortResult<()> {
        self.enter("skip", Call::Skip(session_id)).await?;
        self.set_status(session_id, SessionStatus::Skipped);
        Ok(())
    }
}

//=========================================================================================
// In-Process HTTP Backend
//=========================================================================================

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct BackendState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<(String, String), VecDeque<(u16, String)>>>>,
}

/// An axum server on an ephemeral port that answers canned responses.
/// Responses queued for one route are served in order and the last one repeats.
/// Unconfigured routes answer `200 {}`.
pub struct FakeBackend {
    pub url: String,
    state: BackendState,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = BackendState::default();
        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.state
            .responses
            .lock()
            .unwrap()
            .entry((method.to_string(), format!("/api{}", path)))
            .or_default()
            .push_back((status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };
    let key = (method.to_string(), uri.path().to_string());
    state.requests.lock().unwrap().push(Recorded {
        method: key.0.clone(),
        path: key.1.clone(),
        authorization,
        body,
    });

    let (status, body) = {
        let mut responses = state.responses.lock().unwrap();
        match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => (200, "{}".to_string()),
        }
    };
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

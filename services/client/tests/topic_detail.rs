//! Session lifecycle behaviour of the topic detail view.

mod common;

use chrono::NaiveDate;
use client_lib::views::render::render_topic_detail;
use client_lib::views::{Outcome, TopicDetailView};
use common::{rejected, session, today, topic, Call, ScriptedApi};
use tracker_core::domain::{Mode, SessionId, SessionStatus, TopicId};
use tracker_core::lifecycle::{LifecycleError, SessionAction};
use tracker_core::route::Route;

fn sessions() -> Vec<tracker_core::domain::Session> {
    vec![
        session(1, 1, SessionStatus::Scheduled),
        session(2, 3, SessionStatus::Completed),
        session(3, 7, SessionStatus::Skipped),
    ]
}

async fn loaded(api: std::sync::Arc<ScriptedApi>) -> TopicDetailView {
    let mut view = TopicDetailView::new(api, TopicId(1));
    assert_eq!(view.load().await, Outcome::Applied);
    view
}

#[tokio::test]
async fn load_fetches_topic_and_sessions() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let view = loaded(api.clone()).await;

    assert_eq!(view.topic.as_ref().unwrap().title, "Topic 1");
    assert_eq!(view.sessions.len(), 3);
    let calls = api.calls();
    assert!(calls.contains(&Call::GetTopic(TopicId(1))));
    assert!(calls.contains(&Call::ListSessions(TopicId(1))));
}

#[tokio::test]
async fn actions_are_offered_only_for_scheduled_sessions() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let view = loaded(api).await;

    let scheduled = view.session(SessionId(1)).unwrap();
    assert_eq!(
        view.actions_for(scheduled),
        vec![
            SessionAction::Open,
            SessionAction::Reschedule,
            SessionAction::Complete,
            SessionAction::Skip
        ]
    );
    assert!(view.actions_for(view.session(SessionId(2)).unwrap()).is_empty());
    assert!(view.actions_for(view.session(SessionId(3)).unwrap()).is_empty());

    let text = render_topic_detail(&view, today());
    let lines: Vec<&str> = text.lines().collect();
    let row = |id: &str| lines.iter().find(|l| l.contains(id)).unwrap().to_string();
    assert!(row("#1 ").contains("[Open | Reschedule | Complete | Skip]"));
    assert!(!row("#2 ").contains("Open"));
    assert!(!row("#3 ").contains("Skip]"));
}

#[tokio::test]
async fn open_routes_by_mode_and_carries_the_topic() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Solo), sessions());
    let view = loaded(api).await;

    assert_eq!(
        view.open(SessionId(1)).unwrap(),
        Route::SoloSession {
            session: SessionId(1),
            topic: Some(TopicId(1))
        }
    );
    assert!(matches!(
        view.open(SessionId(2)),
        Err(LifecycleError::Terminal { .. })
    ));
}

#[tokio::test]
async fn complete_refetches_the_full_list() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.clear_calls();

    let outcome = view.complete(SessionId(1)).await.unwrap();

    assert_eq!(outcome, Outcome::Applied);
    let calls = api.calls();
    assert_eq!(calls[0], Call::Complete(SessionId(1)));
    assert!(calls.contains(&Call::ListSessions(TopicId(1))));
    assert_eq!(view.session(SessionId(1)).unwrap().status, SessionStatus::Completed);
    assert!(view.actions_for(view.session(SessionId(1)).unwrap()).is_empty());
}

#[tokio::test]
async fn skip_refetches_the_full_list() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;

    api.clear_calls();

    assert_eq!(view.skip(SessionId(1)).await.unwrap(), Outcome::Applied);
    assert_eq!(api.calls()[0], Call::Skip(SessionId(1)));
    assert!(!api.calls().contains(&Call::Complete(SessionId(1))));
    assert_eq!(view.session(SessionId(1)).unwrap().status, SessionStatus::Skipped);
}

#[tokio::test]
async fn applied_action_with_failed_reload_is_stale() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.fail("list_sessions", rejected("Database unavailable"));
    let before = view.sessions.clone();

    let outcome = view.complete(SessionId(1)).await.unwrap();

    assert_eq!(outcome, Outcome::Stale);
    assert!(view.alert.is_none());
    assert_eq!(view.error.as_deref(), Some("Database unavailable"));
    assert_eq!(view.sessions, before);
    assert!(view.pending.is_none());
    assert_eq!(
        api.sessions.lock().unwrap()[0].status,
        SessionStatus::Completed
    );

    api.heal("list_sessions");
    assert_eq!(view.load().await, Outcome::Applied);
    assert!(view.error.is_none());
    assert!(matches!(
        view.complete(SessionId(1)).await,
        Err(LifecycleError::Terminal { .. })
    ));
}

#[tokio::test]
async fn applied_reschedule_with_failed_reload_is_stale() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.fail("list_sessions", rejected("Database unavailable"));

    view.begin_reschedule(SessionId(1)).unwrap();
    view.set_reschedule_date("2026-11-30");
    assert_eq!(view.save_reschedule(today()).await.unwrap(), Outcome::Stale);

    assert!(view.reschedule.is_none());
    assert!(view.alert.is_none());
    assert_eq!(view.error.as_deref(), Some("Database unavailable"));
}

#[tokio::test]
async fn open_before_loading_reports_the_missing_topic() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let view = TopicDetailView::new(api.clone(), TopicId(1));

    assert_eq!(
        view.open(SessionId(1)),
        Err(LifecycleError::TopicNotLoaded(TopicId(1)))
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn terminal_sessions_cannot_be_completed_or_skipped() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.clear_calls();

    assert!(view.complete(SessionId(2)).await.is_err());
    assert!(view.skip(SessionId(3)).await.is_err());
    assert!(matches!(
        view.complete(SessionId(42)).await,
        Err(LifecycleError::UnknownSession(SessionId(42)))
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn failed_action_keeps_the_snapshot_and_alerts() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.fail("complete", rejected("Session is locked"));
    api.clear_calls();
    let before = view.sessions.clone();

    let outcome = view.complete(SessionId(1)).await.unwrap();

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(view.alert.as_deref(), Some("Session is locked"));
    assert_eq!(view.sessions, before);
    assert_eq!(api.calls(), vec![Call::Complete(SessionId(1))]);
    assert!(view.pending.is_none());

    view.dismiss_alert();
    assert!(view.alert.is_none());
}

#[tokio::test]
async fn failed_skip_without_detail_uses_the_generic_message() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.fail(
        "skip",
        tracker_core::ports::PortError::Transport("connection reset".to_string()),
    );

    assert_eq!(view.skip(SessionId(1)).await.unwrap(), Outcome::Failed);
    assert_eq!(view.alert.as_deref(), Some("Failed to skip session"));
}

#[tokio::test]
async fn failed_refetch_keeps_the_previous_snapshot() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.fail("list_sessions", rejected("Database unavailable"));
    let before = view.sessions.clone();

    assert_eq!(view.load().await, Outcome::Failed);
    assert_eq!(view.sessions, before);
    assert_eq!(view.error.as_deref(), Some("Database unavailable"));
}

#[tokio::test]
async fn reschedule_moves_only_the_date() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    let target = NaiveDate::from_ymd_opt(2026, 11, 30).unwrap();

    view.begin_reschedule(SessionId(1)).unwrap();
    view.set_reschedule_date("2026-11-30");
    let outcome = view.save_reschedule(today()).await.unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert!(view.reschedule.is_none());
    assert!(api.calls().contains(&Call::Reschedule(SessionId(1), target)));
    let moved = view.session(SessionId(1)).unwrap();
    assert_eq!(moved.scheduled_for, target);
    assert_eq!(moved.status, SessionStatus::Scheduled);
}

#[tokio::test]
async fn reschedule_to_the_past_is_rejected_locally() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.clear_calls();

    view.begin_reschedule(SessionId(1)).unwrap();
    view.set_reschedule_date("2026-10-01");
    assert_eq!(view.save_reschedule(today()).await.unwrap(), Outcome::Invalid);

    view.set_reschedule_date("");
    assert_eq!(view.save_reschedule(today()).await.unwrap(), Outcome::Invalid);

    assert!(api.calls().is_empty());
    let form = view.reschedule.as_ref().unwrap();
    assert!(form.error.is_some());
}

#[tokio::test]
async fn failed_reschedule_leaves_the_form_open() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.fail("reschedule", rejected("Date is a holiday"));

    view.begin_reschedule(SessionId(1)).unwrap();
    view.set_reschedule_date("2026-12-25");
    assert_eq!(view.save_reschedule(today()).await.unwrap(), Outcome::Failed);

    assert_eq!(view.alert.as_deref(), Some("Date is a holiday"));
    let form = view.reschedule.as_ref().unwrap();
    assert_eq!(form.session, SessionId(1));
    assert_eq!(form.date, "2026-12-25");

    api.heal("reschedule");
    assert_eq!(view.save_reschedule(today()).await.unwrap(), Outcome::Applied);
    assert!(view.reschedule.is_none());
}

#[tokio::test]
async fn terminal_sessions_cannot_be_rescheduled() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api).await;

    assert!(view.begin_reschedule(SessionId(2)).is_err());
    assert!(view.reschedule.is_none());
}

#[tokio::test]
async fn late_results_are_dropped_after_leaving_the_view() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    let release = api.hold("complete");
    let handle = view.handle();

    let task = tokio::spawn(async move {
        let outcome = view.complete(SessionId(1)).await;
        (outcome, view)
    });
    tokio::task::yield_now().await;
    handle.deactivate();
    release.notify_one();

    let (outcome, view) = task.await.unwrap();
    assert_eq!(outcome.unwrap(), Outcome::Discarded);
    assert_eq!(view.session(SessionId(1)).unwrap().status, SessionStatus::Scheduled);
    assert_eq!(api.calls().last(), Some(&Call::Complete(SessionId(1))));
}

#[tokio::test]
async fn pending_action_disables_its_control() {
    let api = ScriptedApi::with_topic(topic(1, Mode::Automated), sessions());
    let mut view = loaded(api.clone()).await;
    api.clear_calls();
    view.pending = Some((SessionId(1), SessionAction::Complete));

    let actions = view.actions_for(view.session(SessionId(1)).unwrap());
    assert!(!actions.contains(&SessionAction::Complete));
    assert!(actions.contains(&SessionAction::Skip));

    assert_eq!(view.complete(SessionId(1)).await.unwrap(), Outcome::Busy);
    assert_eq!(view.skip(SessionId(1)).await.unwrap(), Outcome::Busy);
    assert!(api.calls().is_empty());
}

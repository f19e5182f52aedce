//! services/client/src/views/render.rs
//!
//! Plain-text rendering of each view's state, as printed by the CLI.

use std::fmt::Write;

use chrono::NaiveDate;
use tracker_core::display::{format_percent, ComparisonDisplay, TrendChart};
use tracker_core::domain::{Session, Topic};

use super::{AutomatedSessionView, DashboardView, SoloPhase, SoloSessionView, TopicDetailView};

const BAR_WIDTH: usize = 20;

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::from("Your Topics\n");
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {}", error);
        return out;
    }
    if view.topics.is_empty() {
        out.push_str("  No topics yet. Create one with `tracker topic create`.\n");
    }
    for topic in &view.topics {
        let _ = writeln!(out, "  [{}] {} ({})", topic.id, topic.title, topic.mode);
    }
    out
}

pub fn render_topic(topic: &Topic) -> String {
    let mut out = format!("{} [{}]\n", topic.title, topic.mode);
    if !topic.description.is_empty() {
        let _ = writeln!(out, "{}", topic.description);
    }
    out
}

/// One session row. Action hints appear only for scheduled sessions.
pub fn render_session_row(view: &TopicDetailView, session: &Session, today: NaiveDate) -> String {
    let mut row = format!(
        "  #{:<4} Day {:<3} {}  {}",
        session.id, session.day_index, session.scheduled_for, session.status
    );
    if session.is_overdue(today) {
        row.push_str(" (overdue)");
    } else if session.is_due(today) {
        row.push_str(" (due today)");
    }
    let actions = view.actions_for(session);
    if !actions.is_empty() {
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let _ = write!(row, "  [{}]", labels.join(" | "));
    }
    row
}

pub fn render_topic_detail(view: &TopicDetailView, today: NaiveDate) -> String {
    let mut out = String::new();
    if let Some(alert) = &view.alert {
        let _ = writeln!(out, "Alert: {}", alert);
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {}", error);
    }
    let Some(topic) = &view.topic else {
        if view.error.is_none() {
            out.push_str("Topic not found\n");
        }
        return out;
    };

    out.push_str(&render_topic(topic));
    out.push_str("Sessions\n");
    if view.sessions.is_empty() {
        out.push_str("  No sessions scheduled yet\n");
    }
    for session in &view.sessions {
        let _ = writeln!(out, "{}", render_session_row(view, session, today));
        if let Some(form) = view.reschedule.as_ref().filter(|f| f.session == session.id) {
            let _ = writeln!(out, "    Reschedule to: {} (on or after {})", form.date, today);
            if let Some(error) = &form.error {
                let _ = writeln!(out, "    {}", error);
            }
        }
    }
    out
}

pub fn render_comparison(display: &ComparisonDisplay) -> String {
    let mut out = String::from("Results\n");
    let _ = writeln!(out, "  Recall Score: {}", display.recall_score);
    if let (Some(heading), Some(missed)) = (display.missed_heading(), &display.missed) {
        let _ = writeln!(out, "  {}", heading);
        for line in missed {
            let _ = writeln!(out, "    - {} (similarity {})", line.text, line.similarity);
        }
    }
    out
}

pub fn render_automated(view: &AutomatedSessionView) -> String {
    let mut out = String::from("Automated Session\n");
    let _ = writeln!(out, "Your Notes ({})", view.notes.len());
    for (i, point) in view.notes.points().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, point);
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {}", error);
    }
    if let Some(display) = view.display() {
        out.push_str(&render_comparison(&display));
    }
    out
}

fn bar(value: f64) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn render_trend(chart: &TrendChart) -> String {
    let mut out = String::new();
    if !chart.is_empty() {
        out.push_str("Progress Trend\n");
        let _ = writeln!(out, "  {:<8} {:<30} Remembered %", TrendChart::X_LABEL, "Coverage %");
        for point in &chart.points {
            let _ = writeln!(
                out,
                "  {:<8} {} {:>6}   {} {:>6}",
                point.index,
                bar(point.coverage),
                format_percent(point.coverage),
                bar(point.remembered),
                format_percent(point.remembered)
            );
        }
    }
    let _ = writeln!(out, "Suggestion: {}", chart.suggestion);
    out
}

pub fn render_solo(view: &SoloSessionView) -> String {
    let mut out = String::from("Solo Session\n");
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {}", error);
    }
    if view.phase == SoloPhase::Submitted {
        out.push_str("Metrics submitted successfully!\n");
        if let Some(chart) = view.chart() {
            out.push_str(&render_trend(&chart));
        }
    }
    out
}

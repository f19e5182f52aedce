//! services/client/src/cli.rs
//!
//! The `tracker` command line. Each subcommand navigates to a view, drives it
//! the way a user would and prints the rendered result.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use tracker_core::domain::{Mode, SessionId, TopicId};
use tracker_core::route::Route;

use crate::adapters::StaticTokenProvider;
use crate::config::Config;
use crate::error::ClientError;
use crate::shell::{AuthenticatedShell, Shell};
use crate::views::{render, Outcome, View};

//=========================================================================================
// Arguments
//=========================================================================================

#[derive(Parser, Debug)]
#[command(name = "tracker", version, about = "Spaced-repetition learning tracker")]
pub struct Cli {
    /// Backend base URL (overrides TRACKER_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token (overrides TRACKER_ACCESS_TOKEN).
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List your topics.
    Topics,
    /// Create or inspect a topic.
    Topic {
        #[command(subcommand)]
        command: TopicCommand,
    },
    /// Review or manage one session.
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
    /// Discard the access token held by this process. A token supplied
    /// through TRACKER_ACCESS_TOKEN or --token is not revoked.
    Logout,
}

#[derive(Subcommand, Debug)]
pub enum TopicCommand {
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// automated or solo
        #[arg(long, default_value = "automated")]
        mode: Mode,
    },
    Show { topic: i64 },
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Show which review screen a session opens.
    Open {
        #[arg(long)]
        topic: i64,
        session: i64,
    },
    Complete {
        #[arg(long)]
        topic: i64,
        session: i64,
    },
    Skip {
        #[arg(long)]
        topic: i64,
        session: i64,
    },
    Reschedule {
        #[arg(long)]
        topic: i64,
        session: i64,
        /// New date, YYYY-MM-DD, today or later.
        #[arg(long)]
        date: String,
    },
    /// Submit bullet points and compare them (automated topics).
    Notes {
        session: i64,
        #[arg(long = "point", required = true)]
        points: Vec<String>,
    },
    /// Report coverage and retention (solo topics).
    Solo {
        session: i64,
        #[arg(long)]
        covered: String,
        #[arg(long)]
        remembered: String,
        /// Owning topic; when given, the trend is shown after submitting.
        #[arg(long)]
        topic: Option<i64>,
    },
}

//=========================================================================================
// Execution
//=========================================================================================

/// Turns a view outcome into a command result, using the message the view shows.
fn settle(outcome: Outcome, message: Option<&String>) -> Result<(), ClientError> {
    let message = || message.cloned().unwrap_or_else(|| "Request failed".to_string());
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::Failed => Err(ClientError::Rejected(message())),
        Outcome::Stale => Err(ClientError::Stale(message())),
        Outcome::Invalid => Err(ClientError::Invalid(message())),
        Outcome::Busy | Outcome::Discarded => Err(ClientError::Internal(format!(
            "view returned {:?}",
            outcome
        ))),
    }
}

fn unexpected_view(route: &Route) -> ClientError {
    ClientError::Internal(format!("no matching view for {}", route))
}

pub async fn run(cli: Cli, config: Config) -> Result<(), ClientError> {
    let config = match &cli.api_url {
        Some(url) => config.with_api_url(url)?,
        None => config,
    };
    let token = cli.token.clone().or_else(|| config.access_token.clone());
    let tokens = Arc::new(StaticTokenProvider::new(token));
    let shell = Shell::new(config, tokens);
    if let Command::Logout = cli.command {
        shell.logout().await?;
        println!("Discarded the in-process access token.");
        return Ok(());
    }
    let mut shell = shell.authenticate()?;
    let today = Local::now().date_naive();

    match cli.command {
        Command::Topics => list_topics(&mut shell).await,
        Command::Topic { command } => match command {
            TopicCommand::Create {
                title,
                description,
                mode,
            } => create_topic(&mut shell, title, description, mode).await,
            TopicCommand::Show { topic } => show_topic(&mut shell, TopicId(topic), today).await,
        },
        Command::Session { command } => run_session(&mut shell, command, today).await,
        // Handled above, before authenticating.
        Command::Logout => Ok(()),
    }
}

async fn list_topics(shell: &mut AuthenticatedShell) -> Result<(), ClientError> {
    let View::Dashboard(mut view) = shell.navigate(Route::Dashboard) else {
        return Err(unexpected_view(&Route::Dashboard));
    };
    let outcome = view.load().await;
    print!("{}", render::render_dashboard(&view));
    settle(outcome, view.error.as_ref())
}

async fn create_topic(
    shell: &mut AuthenticatedShell,
    title: String,
    description: String,
    mode: Mode,
) -> Result<(), ClientError> {
    let View::CreateTopic(mut view) = shell.navigate(Route::CreateTopic) else {
        return Err(unexpected_view(&Route::CreateTopic));
    };
    view.title = title;
    view.description = description;
    view.mode = mode;
    let outcome = view.submit().await;
    settle(outcome, view.error.as_ref())?;

    if let Some(topic) = &view.created {
        println!("Created topic [{}] {} ({})", topic.id, topic.title, topic.mode);
    }
    if let Some(next) = view.next_route() {
        info!("Returning to {}", next);
        list_topics(shell).await?;
    }
    Ok(())
}

async fn topic_view(
    shell: &mut AuthenticatedShell,
    topic: TopicId,
) -> Result<crate::views::TopicDetailView, ClientError> {
    let route = Route::TopicDetail { topic };
    let View::TopicDetail(mut view) = shell.navigate(route.clone()) else {
        return Err(unexpected_view(&route));
    };
    let outcome = view.load().await;
    settle(outcome, view.error.as_ref())?;
    Ok(view)
}

async fn show_topic(
    shell: &mut AuthenticatedShell,
    topic: TopicId,
    today: NaiveDate,
) -> Result<(), ClientError> {
    let view = topic_view(shell, topic).await?;
    print!("{}", render::render_topic_detail(&view, today));
    Ok(())
}

async fn run_session(
    shell: &mut AuthenticatedShell,
    command: SessionCommand,
    today: NaiveDate,
) -> Result<(), ClientError> {
    match command {
        SessionCommand::Open { topic, session } => {
            let view = topic_view(shell, TopicId(topic)).await?;
            let route = view.open(SessionId(session))?;
            println!("Open {}", route);
            Ok(())
        }
        SessionCommand::Complete { topic, session } => {
            let mut view = topic_view(shell, TopicId(topic)).await?;
            let outcome = view.complete(SessionId(session)).await?;
            print!("{}", render::render_topic_detail(&view, today));
            settle(outcome, view.alert.as_ref().or(view.error.as_ref()))
        }
        SessionCommand::Skip { topic, session } => {
            let mut view = topic_view(shell, TopicId(topic)).await?;
            let outcome = view.skip(SessionId(session)).await?;
            print!("{}", render::render_topic_detail(&view, today));
            settle(outcome, view.alert.as_ref().or(view.error.as_ref()))
        }
        SessionCommand::Reschedule {
            topic,
            session,
            date,
        } => {
            let mut view = topic_view(shell, TopicId(topic)).await?;
            view.begin_reschedule(SessionId(session))?;
            view.set_reschedule_date(&date);
            let outcome = view.save_reschedule(today).await?;
            print!("{}", render::render_topic_detail(&view, today));
            let form_error = view.reschedule.as_ref().and_then(|f| f.error.clone());
            let message = form_error
                .as_ref()
                .or(view.alert.as_ref())
                .or(view.error.as_ref());
            settle(outcome, message)
        }
        SessionCommand::Notes { session, points } => {
            let route = Route::AutomatedSession {
                session: SessionId(session),
            };
            let View::Automated(mut view) = shell.navigate(route.clone()) else {
                return Err(unexpected_view(&route));
            };
            for point in &points {
                view.add_point(point);
            }
            let outcome = view.submit().await;
            print!("{}", render::render_automated(&view));
            settle(outcome, view.error.as_ref())
        }
        SessionCommand::Solo {
            session,
            covered,
            remembered,
            topic,
        } => {
            let route = Route::SoloSession {
                session: SessionId(session),
                topic: topic.map(TopicId),
            };
            let View::Solo(mut view) = shell.navigate(route.clone()) else {
                return Err(unexpected_view(&route));
            };
            view.mount().await;
            view.covered = covered;
            view.remembered = remembered;
            let outcome = view.submit().await;
            print!("{}", render::render_solo(&view));
            settle(outcome, view.error.as_ref())
        }
    }
}

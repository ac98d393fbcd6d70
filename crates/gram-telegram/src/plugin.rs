//! End-of-session Telegram report plugin.
//!
//! Loads the account's session log, folds it into daily and trailing-week
//! totals, renders the stats report, and delivers it through the Bot API.
//! Missing inputs skip the run with an error log; delivery problems are
//! logged and never retried.

use crate::client::{failure_description, TelegramClient};
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use gram_analytics::aggregations::{daily_totals, session_duration_mins, trailing_week_totals};
use gram_analytics::reports::render_report;
use gram_core::account::AccountPaths;
use gram_core::config::TelegramConfig;
use gram_core::session::{load_sessions, SessionRecord};
use gram_plugins::{Plugin, PluginCategory, PluginInfo, RunContext};

pub const PLUGIN_NAME: &str = "telegram-reports";

/// Sends a per-account stats report to Telegram after a bot session.
pub struct TelegramReports {
    client: TelegramClient,
}

impl TelegramReports {
    pub fn new() -> Self {
        Self {
            client: TelegramClient::new(),
        }
    }
}

impl Default for TelegramReports {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for TelegramReports {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            category: PluginCategory::Report,
            description: "Generate an activity report at the end of the session and send it \
                          using Telegram. Requires telegram.yml in the account folder."
                .to_string(),
        }
    }

    async fn run(&self, ctx: &RunContext) -> Result<(), String> {
        let paths = AccountPaths::new(&ctx.accounts_root, &ctx.username);

        let sessions = match load_sessions(&paths.sessions_file()) {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::error!(
                    "No session data found for {}: {}. Skipping report generation.",
                    ctx.username,
                    e
                );
                return Ok(());
            }
        };
        let last_session = match sessions.last() {
            Some(last) => last,
            None => {
                tracing::error!(
                    "No session data found for {}. Skipping report generation.",
                    ctx.username
                );
                return Ok(());
            }
        };

        let config = match TelegramConfig::load_from(&paths.telegram_config_file()) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(
                    "No telegram config found for {}: {}. Skipping report generation.",
                    ctx.username,
                    e
                );
                return Ok(());
            }
        };

        let report = build_report(
            &ctx.username,
            &sessions,
            last_session,
            ctx.followers_now,
            ctx.following_now,
            Local::now().naive_local(),
        );

        let response = self
            .client
            .send_message(&config.api_token, &config.chat_id, &report)
            .await;
        match failure_description(response.as_ref()) {
            None => tracing::info!("Telegram message sent successfully."),
            Some(reason) => tracing::error!("Failed to send Telegram message: {}", reason),
        }
        Ok(())
    }
}

/// Assemble the report text for a loaded session log.
///
/// The "today" bucket is the one for the last session's date; live counts
/// fall back to that session's snapshot when the caller has none.
fn build_report(
    username: &str,
    sessions: &[SessionRecord],
    last_session: &SessionRecord,
    followers_now: Option<i64>,
    following_now: Option<i64>,
    today: NaiveDateTime,
) -> String {
    let days = daily_totals(sessions);
    let today_bucket = days.get(last_session.date_key()).cloned().unwrap_or_default();
    let week = trailing_week_totals(&days, today);
    let last_duration = session_duration_mins(last_session);
    let followers_now = followers_now.unwrap_or_else(|| last_session.followers_or_zero());
    let following_now = following_now.unwrap_or_else(|| last_session.following_or_zero());

    render_report(
        username,
        last_session,
        last_duration,
        &today_bucket,
        &week,
        followers_now,
        following_now,
    )
}

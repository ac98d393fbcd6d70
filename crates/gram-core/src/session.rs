//! Session log records produced by the bot at the end of each run.
//!
//! `accounts/<username>/sessions.json` is an append-only JSON array. Records
//! are read-only here; field types are coerced leniently because old logger
//! versions wrote counters as strings.

use crate::coerce::{lenient_count, lenient_count_opt};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Follower/following counts captured when the session ended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(default, deserialize_with = "lenient_count_opt")]
    pub followers: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count_opt")]
    pub following: Option<i64>,
}

/// One bot run as logged to `sessions.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub id: String,
    /// Start timestamp, `YYYY-MM-DD HH:MM:SS.ffffff`.
    #[serde(default)]
    pub start_time: String,
    /// Finish timestamp; absent for sessions that never ended cleanly.
    #[serde(default)]
    pub finish_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_likes: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_watched: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_followed: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_unfollowed: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_comments: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_pm: i64,
    #[serde(default)]
    pub profile: Option<ProfileSnapshot>,
}

impl SessionRecord {
    /// Calendar-date key for bucketing: the first 10 characters of
    /// `start_time` (`YYYY-MM-DD`). Falls back to the whole string when it
    /// is shorter than that or cut mid-character.
    pub fn date_key(&self) -> &str {
        self.start_time.get(..10).unwrap_or(&self.start_time)
    }

    /// Follower count from the profile snapshot, 0 when absent or unusable.
    pub fn followers_or_zero(&self) -> i64 {
        self.profile
            .as_ref()
            .and_then(|p| p.followers)
            .unwrap_or(0)
    }

    /// Following count from the profile snapshot, 0 when absent or unusable.
    pub fn following_or_zero(&self) -> i64 {
        self.profile
            .as_ref()
            .and_then(|p| p.following)
            .unwrap_or(0)
    }
}

/// Load the full session log for an account.
///
/// A missing or malformed file is an error; callers log it and skip their
/// run rather than aborting the process.
pub fn load_sessions(path: &Path) -> Result<Vec<SessionRecord>> {
    let raw = std::fs::read_to_string(path)?;
    let sessions: Vec<SessionRecord> = serde_json::from_str(&raw)?;
    Ok(sessions)
}

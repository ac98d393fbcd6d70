//! Session aggregation: daily buckets, follower trends, trailing-week sums.
//!
//! Folds the bot's session log into per-date buckets keyed by `YYYY-MM-DD`,
//! derives day-over-day follower deltas, and sums the trailing week for the
//! report.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use gram_core::session::SessionRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timestamp layout used by the session log.
pub const SESSION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Date layout of bucket keys.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

// ── Day Totals ──────────────────────────────────────────────────────────

/// Running totals for one calendar date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    /// Summed session duration in whole minutes.
    pub duration_mins: i64,
    pub likes: i64,
    pub watched: i64,
    pub followed: i64,
    pub unfollowed: i64,
    pub comments: i64,
    pub pm_sent: i64,
    /// Minimum follower count observed across the date's sessions.
    pub followers: Option<i64>,
    /// Minimum following count observed across the date's sessions.
    pub following: Option<i64>,
    /// Day-over-day follower delta; stays 0 for the earliest date.
    pub followers_gained: i64,
}

impl DayTotals {
    /// Fold one session into this bucket.
    fn absorb(&mut self, session: &SessionRecord) {
        self.duration_mins += session_duration_mins(session);
        self.likes += session.total_likes;
        self.watched += session.total_watched;
        self.followed += session.total_followed;
        self.unfollowed += session.total_unfollowed;
        self.comments += session.total_comments;
        self.pm_sent += session.total_pm;

        // A session without a usable snapshot counts as 0 before the min,
        // matching the log's loose typing.
        let followers = session.followers_or_zero();
        let following = session.following_or_zero();
        self.followers = Some(self.followers.map_or(followers, |cur| cur.min(followers)));
        self.following = Some(self.following.map_or(following, |cur| cur.min(following)));
    }

    /// Follower minimum with "never observed" treated as 0.
    pub fn followers_or_zero(&self) -> i64 {
        self.followers.unwrap_or(0)
    }
}

// ── Aggregation ─────────────────────────────────────────────────────────

/// Elapsed whole minutes between a session's start and finish timestamps,
/// floored. 0 when the finish timestamp is absent or either timestamp does
/// not parse, which covers sessions that never ended cleanly.
pub fn session_duration_mins(session: &SessionRecord) -> i64 {
    let finish = match session.finish_time.as_deref() {
        Some(finish) if !finish.trim().is_empty() => finish,
        _ => {
            tracing::debug!(
                "Session {} has no finish_time, skipping duration calculation",
                session.id
            );
            return 0;
        }
    };

    let start = NaiveDateTime::parse_from_str(&session.start_time, SESSION_TIME_FORMAT);
    let finish = NaiveDateTime::parse_from_str(finish, SESSION_TIME_FORMAT);
    match (start, finish) {
        (Ok(start), Ok(finish)) => (finish - start).num_seconds().div_euclid(60),
        _ => {
            tracing::debug!(
                "Session {} has an unparsable timestamp, skipping duration calculation",
                session.id
            );
            0
        }
    }
}

/// Fold session records into per-date buckets keyed by `YYYY-MM-DD`.
///
/// Records arrive in log order, not necessarily sorted; the returned map is
/// ordered by date key, which for this key layout is chronological order.
/// Follower deltas are derived before returning.
pub fn daily_totals(sessions: &[SessionRecord]) -> BTreeMap<String, DayTotals> {
    let mut days: BTreeMap<String, DayTotals> = BTreeMap::new();
    for session in sessions {
        days.entry(session.date_key().to_string())
            .or_default()
            .absorb(session);
    }
    apply_follower_gains(&mut days);
    days
}

/// Derive day-over-day follower deltas across buckets in date order.
///
/// The earliest date keeps its initial 0; every later date gets its own
/// follower count minus the previous date's, negative when followers were
/// lost. Gaps between dates are not interpolated.
fn apply_follower_gains(days: &mut BTreeMap<String, DayTotals>) {
    let mut previous: Option<i64> = None;
    for bucket in days.values_mut() {
        let current = bucket.followers_or_zero();
        if let Some(previous) = previous {
            bucket.followers_gained = current - previous;
        }
        previous = Some(current);
    }
}

/// Sum the buckets within the trailing week of `today` into one bucket.
///
/// A bucket is included when `today - date <= 7` whole days, an inclusive
/// window spanning up to 8 calendar dates. Dates in the future of `today`
/// are inside the window. Counters, duration, and `followers_gained` sum;
/// the follower/following minimums stay `None` as they have no meaning
/// across dates.
pub fn trailing_week_totals(
    days: &BTreeMap<String, DayTotals>,
    today: NaiveDateTime,
) -> DayTotals {
    let mut week = DayTotals::default();
    for (date_key, bucket) in days {
        let date = match NaiveDate::parse_from_str(date_key, DATE_KEY_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                tracing::debug!("Skipping bucket with unparsable date key {:?}", date_key);
                continue;
            }
        };
        if (today - date.and_time(NaiveTime::MIN)).num_days() > 7 {
            continue;
        }

        week.duration_mins += bucket.duration_mins;
        week.likes += bucket.likes;
        week.watched += bucket.watched;
        week.followed += bucket.followed;
        week.unfollowed += bucket.unfollowed;
        week.comments += bucket.comments;
        week.pm_sent += bucket.pm_sent;
        week.followers_gained += bucket.followers_gained;
    }
    week
}

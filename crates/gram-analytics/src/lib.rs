//! Aggregation and reporting over bot session logs.
//!
//! Turns the raw `sessions.json` records into per-date totals, follower
//! trends, and a trailing-week summary, and renders the Telegram report
//! from them.

pub mod aggregations;
pub mod reports;

pub use aggregations::{
    daily_totals, session_duration_mins, trailing_week_totals, DayTotals, SESSION_TIME_FORMAT,
};
pub use reports::render_report;

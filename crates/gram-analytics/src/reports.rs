//! Markdown report rendering for Telegram delivery.

use crate::aggregations::DayTotals;
use gram_core::session::SessionRecord;

/// Render the end-of-session stats report.
///
/// `today` is the bucket for the latest session's date and `week` the
/// trailing-week sum; weekly figures are shown as per-day averages over 7
/// regardless of how many dates actually had sessions. Live counts are
/// compared against the last session's snapshot for the deltas.
pub fn render_report(
    username: &str,
    last_session: &SessionRecord,
    last_duration_mins: i64,
    today: &DayTotals,
    week: &DayTotals,
    followers_now: i64,
    following_now: i64,
) -> String {
    let followers_diff = followers_now - last_session.followers_or_zero();
    let following_diff = following_now - last_session.following_or_zero();

    let mut report = String::new();
    report.push_str(&format!("*Stats for {}*\n\n", username));

    report.push_str("*✨Overview after last activity*\n");
    report.push_str(&format!(
        "• {} followers ({:+})\n",
        followers_now, followers_diff
    ));
    report.push_str(&format!(
        "• {} following ({:+})\n\n",
        following_now, following_diff
    ));

    report.push_str("*🤖 Last session actions*\n");
    report.push_str(&format!("• {} minutes of botting\n", last_duration_mins));
    report.push_str(&format!("• {} likes\n", last_session.total_likes));
    report.push_str(&format!("• {} follows\n", last_session.total_followed));
    report.push_str(&format!("• {} unfollows\n", last_session.total_unfollowed));
    report.push_str(&format!(
        "• {} stories watched\n",
        last_session.total_watched
    ));
    report.push_str(&format!("• {} comments done\n", last_session.total_comments));
    report.push_str(&format!("• {} PM sent\n\n", last_session.total_pm));

    report.push_str("*📅 Today's total actions*\n");
    report.push_str(&format!("• {} minutes of botting\n", today.duration_mins));
    report.push_str(&format!("• {} likes\n", today.likes));
    report.push_str(&format!("• {} follows\n", today.followed));
    report.push_str(&format!("• {} unfollows\n", today.unfollowed));
    report.push_str(&format!("• {} stories watched\n", today.watched));
    report.push_str(&format!("• {} comments done\n", today.comments));
    report.push_str(&format!("• {} PM sent\n\n", today.pm_sent));

    report.push_str("*📈 Trends*\n");
    report.push_str(&format!(
        "• {} new followers today\n",
        today.followers_gained
    ));
    report.push_str(&format!(
        "• {} new followers this week\n\n",
        week.followers_gained
    ));

    report.push_str("*🗓 7-Day Average*\n");
    report.push_str(&format!(
        "• {:.0} minutes of botting\n",
        week.duration_mins as f64 / 7.0
    ));
    report.push_str(&format!("• {:.0} likes\n", week.likes as f64 / 7.0));
    report.push_str(&format!("• {:.0} follows\n", week.followed as f64 / 7.0));
    report.push_str(&format!(
        "• {:.0} unfollows\n",
        week.unfollowed as f64 / 7.0
    ));
    report.push_str(&format!(
        "• {:.0} stories watched\n",
        week.watched as f64 / 7.0
    ));
    report.push_str(&format!(
        "• {:.0} comments done\n",
        week.comments as f64 / 7.0
    ));
    report.push_str(&format!("• {:.0} PM sent\n", week.pm_sent as f64 / 7.0));

    report
}

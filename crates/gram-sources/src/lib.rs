//! Follow-list maintenance for bot accounts.
//!
//! A standalone utility, not part of the reporting pipeline: it prunes
//! already-handled users from an account's `follow_any.yml` source list and
//! merges in newly scraped usernames, preserving the file's key order and
//! inline list style.

pub mod emit;
pub mod error;
pub mod updater;

pub use emit::to_flow_yaml;
pub use error::{Result, SourcesError};
pub use updater::{
    update_blogger_followers, InteractionRecord, UpdateOutcome, FOLLOW_LIST_FILE,
    INTERACTED_USERS_FILE,
};

//! Shared account and session plumbing for the gram-kit tools.
//!
//! Models the bot's on-disk layout: per-account folders holding a session
//! log (`sessions.json`) and messaging config (`telegram.yml`), with
//! lenient parsing for the loosely-typed values old logger versions wrote.

pub mod account;
pub mod coerce;
pub mod config;
pub mod error;
pub mod session;

pub use account::AccountPaths;
pub use config::TelegramConfig;
pub use error::{CoreError, Result};
pub use session::{load_sessions, ProfileSnapshot, SessionRecord};

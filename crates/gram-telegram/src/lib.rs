//! Telegram delivery for gram-kit reports.

pub mod client;
pub mod plugin;

pub use client::{failure_description, SendMessageResponse, TelegramClient};
pub use plugin::{TelegramReports, PLUGIN_NAME};

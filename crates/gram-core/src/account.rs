//! On-disk layout of a bot account folder.

use std::path::PathBuf;

/// Well-known files inside one account folder, `<root>/<username>/`.
#[derive(Debug, Clone)]
pub struct AccountPaths {
    root: PathBuf,
    username: String,
}

impl AccountPaths {
    pub fn new(root: impl Into<PathBuf>, username: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            username: username.into(),
        }
    }

    /// The account folder itself.
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.username)
    }

    /// Append-only session log written by the bot.
    pub fn sessions_file(&self) -> PathBuf {
        self.dir().join("sessions.json")
    }

    /// Telegram delivery settings for this account.
    pub fn telegram_config_file(&self) -> PathBuf {
        self.dir().join("telegram.yml")
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

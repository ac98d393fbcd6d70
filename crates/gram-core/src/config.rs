//! Per-account messaging configuration, `accounts/<username>/telegram.yml`.

use crate::error::Result;
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Telegram delivery settings for one account.
///
/// ```yaml
/// telegram-api-token: 123456:ABC-DEF1234
/// telegram-chat-id: 123456789
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    #[serde(rename = "telegram-api-token")]
    pub api_token: String,
    /// Chat ids are numeric but often quoted in configs; both forms load.
    #[serde(rename = "telegram-chat-id", deserialize_with = "string_or_number")]
    pub chat_id: String,
}

impl TelegramConfig {
    /// Load from a `telegram.yml` file. A missing file or missing keys are
    /// an error; callers log it and skip sending.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&raw)?;
        Ok(config)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_with_numeric_chat_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telegram.yml");
        std::fs::write(
            &path,
            "telegram-api-token: 123456:ABC-DEF\ntelegram-chat-id: 987654321\n",
        )
        .unwrap();

        let config = TelegramConfig::load_from(&path).unwrap();
        assert_eq!(config.api_token, "123456:ABC-DEF");
        assert_eq!(config.chat_id, "987654321");
    }

    #[test]
    fn test_load_with_quoted_chat_id() {
        let config: TelegramConfig = serde_yaml::from_str(
            "telegram-api-token: tok\ntelegram-chat-id: \"-100123\"\n",
        )
        .unwrap();
        assert_eq!(config.chat_id, "-100123");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TelegramConfig::load_from(&dir.path().join("telegram.yml")).is_err());
    }

    #[test]
    fn test_load_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telegram.yml");
        std::fs::write(&path, "telegram-api-token: tok\n").unwrap();
        assert!(TelegramConfig::load_from(&path).is_err());
    }
}

//! Follow-list maintenance for one account folder.
//!
//! `follow_any.yml` carries the list of source users the bot may follow
//! under `actions.blogger-followers`. Each run prunes users the bot has
//! already followed or unfollowed (per `interacted_users.json`) and merges
//! in newly scraped usernames, then rewrites the file in place.

use crate::emit::to_flow_yaml;
use crate::error::{Result, SourcesError};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Follow-list config file inside an account folder.
pub const FOLLOW_LIST_FILE: &str = "follow_any.yml";
/// Interaction history file inside an account folder.
pub const INTERACTED_USERS_FILE: &str = "interacted_users.json";

const ACTIONS_KEY: &str = "actions";
const BLOGGER_FOLLOWERS_KEY: &str = "blogger-followers";

/// One persisted bot interaction with a target user. Only the follow state
/// matters here; the file carries plenty of other fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionRecord {
    #[serde(default)]
    pub following_status: Option<String>,
}

impl InteractionRecord {
    /// Whether the bot has already followed or unfollowed this user.
    fn settled(&self) -> bool {
        matches!(
            self.following_status.as_deref(),
            Some("followed") | Some("unfollowed")
        )
    }
}

/// Counters describing one follow-list update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Entries kept from the existing list.
    pub retained: usize,
    /// Entries dropped as already followed or unfollowed.
    pub removed: usize,
    /// Newly scraped usernames appended.
    pub appended: usize,
}

/// Refresh the `blogger-followers` source list for one account.
///
/// Drops users whose interaction record says followed or unfollowed, keeps
/// everyone else in order (including users with no record at all), then
/// appends scraped usernames not already present, in scrape order. All
/// other config keys pass through untouched and the file is rewritten
/// atomically.
pub fn update_blogger_followers(
    account_dir: &Path,
    scraped_file: Option<&Path>,
) -> Result<UpdateOutcome> {
    let config_path = account_dir.join(FOLLOW_LIST_FILE);
    let mut config = load_config(&config_path)?;
    let interacted = load_interacted_users(&account_dir.join(INTERACTED_USERS_FILE));

    let mut outcome = UpdateOutcome::default();
    let current = current_followers(&config);
    let mut updated: Vec<Value> = Vec::with_capacity(current.len());
    for entry in current {
        let keep = match entry.as_str() {
            Some(user) => !interacted
                .get(user)
                .map(|record| record.settled())
                .unwrap_or(false),
            // Non-string entries never match an interaction record.
            None => true,
        };
        if keep {
            outcome.retained += 1;
            updated.push(entry);
        } else {
            outcome.removed += 1;
        }
    }

    if let Some(path) = scraped_file {
        for user in load_scraped_users(path) {
            let present = updated.iter().any(|v| v.as_str() == Some(user.as_str()));
            if !present {
                updated.push(Value::String(user));
                outcome.appended += 1;
            }
        }
    }

    set_followers(&mut config, updated);
    save_config(&config_path, &config)?;
    Ok(outcome)
}

fn load_config(path: &Path) -> Result<Mapping> {
    let raw = std::fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&raw)?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(SourcesError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// Interaction records keyed by username. A missing or unreadable file
/// means no interactions, so every listed user is kept.
fn load_interacted_users(path: &Path) -> HashMap<String, InteractionRecord> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return HashMap::new(),
    };
    match serde_json::from_str(&raw) {
        Ok(map) => map,
        Err(e) => {
            tracing::debug!(
                "Ignoring unreadable interaction records at {}: {}",
                path.display(),
                e
            );
            HashMap::new()
        }
    }
}

/// Usernames from a scraped file, one per non-blank line, trimmed. A
/// missing file yields an empty list.
fn load_scraped_users(path: &Path) -> Vec<String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn current_followers(config: &Mapping) -> Vec<Value> {
    config
        .get(ACTIONS_KEY)
        .and_then(Value::as_mapping)
        .and_then(|actions| actions.get(BLOGGER_FOLLOWERS_KEY))
        .and_then(Value::as_sequence)
        .cloned()
        .unwrap_or_default()
}

/// Put the updated list back under `actions.blogger-followers`, creating
/// the path when absent. Existing keys keep their positions.
fn set_followers(config: &mut Mapping, followers: Vec<Value>) {
    let actions = config
        .entry(Value::String(ACTIONS_KEY.to_string()))
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    if !actions.is_mapping() {
        *actions = Value::Mapping(Mapping::new());
    }
    if let Some(actions) = actions.as_mapping_mut() {
        actions.insert(
            Value::String(BLOGGER_FOLLOWERS_KEY.to_string()),
            Value::Sequence(followers),
        );
    }
}

/// Rewrite the config atomically: render to a temp file beside the target,
/// then rename over it.
fn save_config(path: &Path, config: &Mapping) -> Result<()> {
    let rendered = to_flow_yaml(config)?;
    let tmp = tmp_path(path);
    std::fs::write(&tmp, rendered)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| FOLLOW_LIST_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) {
        std::fs::write(dir.join(FOLLOW_LIST_FILE), body).unwrap();
    }

    fn write_interacted(dir: &Path, body: &str) {
        std::fs::write(dir.join(INTERACTED_USERS_FILE), body).unwrap();
    }

    fn read_config(dir: &Path) -> String {
        std::fs::read_to_string(dir.join(FOLLOW_LIST_FILE)).unwrap()
    }

    const BASE_CONFIG: &str = concat!(
        "username: alice\n",
        "actions:\n",
        "  blogger-followers: [bob, carol, dave]\n",
        "  likes-count: 10\n",
        "stories: true\n",
    );

    #[test]
    fn test_removes_followed_and_unfollowed_users() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), BASE_CONFIG);
        write_interacted(
            dir.path(),
            r#"{
                "bob": {"following_status": "followed"},
                "carol": {"following_status": "pending"},
                "dave": {"following_status": "unfollowed"}
            }"#,
        );

        let outcome = update_blogger_followers(dir.path(), None).unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome {
                retained: 1,
                removed: 2,
                appended: 0
            }
        );
        assert!(read_config(dir.path()).contains("blogger-followers: [carol]\n"));
    }

    #[test]
    fn test_users_without_records_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), BASE_CONFIG);
        write_interacted(dir.path(), r#"{"bob": {"following_status": "followed"}}"#);

        let outcome = update_blogger_followers(dir.path(), None).unwrap();
        assert_eq!(outcome.retained, 2);
        assert_eq!(outcome.removed, 1);
        assert!(read_config(dir.path()).contains("blogger-followers: [carol, dave]\n"));
    }

    #[test]
    fn test_missing_interacted_file_keeps_everyone() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), BASE_CONFIG);

        let outcome = update_blogger_followers(dir.path(), None).unwrap();
        assert_eq!(outcome.retained, 3);
        assert_eq!(outcome.removed, 0);
        assert!(read_config(dir.path()).contains("blogger-followers: [bob, carol, dave]\n"));
    }

    #[test]
    fn test_malformed_interacted_file_keeps_everyone() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), BASE_CONFIG);
        write_interacted(dir.path(), "{broken json");

        let outcome = update_blogger_followers(dir.path(), None).unwrap();
        assert_eq!(outcome.retained, 3);
        assert_eq!(outcome.removed, 0);
    }

    #[test]
    fn test_scraped_users_appended_in_order_without_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), BASE_CONFIG);
        write_interacted(dir.path(), r#"{"bob": {"following_status": "followed"}}"#);

        let scraped = dir.path().join("scraped.txt");
        std::fs::write(&scraped, "erin\n\n  carol  \nfrank\nerin\n").unwrap();

        let outcome = update_blogger_followers(dir.path(), Some(&scraped)).unwrap();
        // carol is already listed, the second erin is a duplicate.
        assert_eq!(
            outcome,
            UpdateOutcome {
                retained: 2,
                removed: 1,
                appended: 2
            }
        );
        assert!(
            read_config(dir.path()).contains("blogger-followers: [carol, dave, erin, frank]\n")
        );
    }

    #[test]
    fn test_scraped_user_rejoins_after_removal() {
        // A user pruned in this same run is no longer "already present", so
        // a fresh scrape puts them back at the end.
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), BASE_CONFIG);
        write_interacted(dir.path(), r#"{"bob": {"following_status": "unfollowed"}}"#);

        let scraped = dir.path().join("scraped.txt");
        std::fs::write(&scraped, "bob\n").unwrap();

        let outcome = update_blogger_followers(dir.path(), Some(&scraped)).unwrap();
        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.appended, 1);
        assert!(read_config(dir.path()).contains("blogger-followers: [carol, dave, bob]\n"));
    }

    #[test]
    fn test_missing_scraped_file_appends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), BASE_CONFIG);

        let outcome =
            update_blogger_followers(dir.path(), Some(&dir.path().join("nope.txt"))).unwrap();
        assert_eq!(outcome.appended, 0);
        assert_eq!(outcome.retained, 3);
    }

    #[test]
    fn test_other_keys_and_order_survive_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), BASE_CONFIG);
        write_interacted(dir.path(), r#"{"bob": {"following_status": "followed"}}"#);

        update_blogger_followers(dir.path(), None).unwrap();
        assert_eq!(
            read_config(dir.path()),
            concat!(
                "username: alice\n",
                "actions:\n",
                "  blogger-followers: [carol, dave]\n",
                "  likes-count: 10\n",
                "stories: true\n",
            )
        );
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = update_blogger_followers(dir.path(), None);
        assert!(matches!(result, Err(SourcesError::Io(_))));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "- just\n- a\n- list\n");
        let result = update_blogger_followers(dir.path(), None);
        assert!(matches!(result, Err(SourcesError::Config(_))));
    }

    #[test]
    fn test_config_without_followers_list_gains_one() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "username: alice\n");

        let scraped = dir.path().join("scraped.txt");
        std::fs::write(&scraped, "erin\n").unwrap();

        let outcome = update_blogger_followers(dir.path(), Some(&scraped)).unwrap();
        assert_eq!(outcome.appended, 1);
        assert_eq!(
            read_config(dir.path()),
            "username: alice\nactions:\n  blogger-followers: [erin]\n"
        );
    }

    #[test]
    fn test_no_tmp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), BASE_CONFIG);

        update_blogger_followers(dir.path(), None).unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}

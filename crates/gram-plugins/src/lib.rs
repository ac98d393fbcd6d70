//! Plugin system for the gram-kit bot tools.
//!
//! Provides a `Plugin` trait invoked once per account run and a
//! `PluginRegistry` for registering, querying, and dispatching plugins.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

// ── Category ───────────────────────────────────────────────────────────

/// Bot-framework plugin categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PluginCategory {
    /// Drives interactions during a bot session (likes, follows, …).
    Action,
    /// Produces summaries after a session (reports, notifications).
    Report,
    /// Decides which profiles the bot may interact with.
    Filter,
    /// Account maintenance outside the session loop.
    Utility,
}

// ── Plugin Trait ────────────────────────────────────────────────────────

/// Metadata describing a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub category: PluginCategory,
    pub description: String,
}

/// Per-invocation context handed to [`Plugin::run`].
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Account username this invocation targets.
    pub username: String,
    /// Root directory holding per-account folders.
    pub accounts_root: PathBuf,
    /// Live follower count supplied by the caller, when known.
    pub followers_now: Option<i64>,
    /// Live following count supplied by the caller, when known.
    pub following_now: Option<i64>,
}

impl RunContext {
    pub fn new(username: impl Into<String>, accounts_root: impl Into<PathBuf>) -> Self {
        Self {
            username: username.into(),
            accounts_root: accounts_root.into(),
            followers_now: None,
            following_now: None,
        }
    }
}

/// Trait that all plugins must implement.
///
/// `run` is async so plugins can do network I/O. Expected per-run problems
/// (a missing log, absent config) are handled inside `run` by logging and
/// returning `Ok`; an `Err` means the invocation itself was invalid.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Return metadata about this plugin.
    fn info(&self) -> PluginInfo;

    /// Execute the plugin for one account invocation.
    async fn run(&self, ctx: &RunContext) -> Result<(), String>;
}

// ── Plugin Key ─────────────────────────────────────────────────────────

/// Unique key for a registered plugin (category + name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginKey {
    pub category: PluginCategory,
    pub name: String,
}

impl PluginKey {
    pub fn new(category: PluginCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }
}

impl fmt::Display for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{}", self.category, self.name)
    }
}

// ── Registry ───────────────────────────────────────────────────────────

/// Central registry for all plugins.
pub struct PluginRegistry {
    plugins: HashMap<PluginKey, Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a plugin. Returns an error if a plugin with the same key already exists.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<(), String> {
        let info = plugin.info();
        let key = PluginKey::new(info.category.clone(), &info.name);
        if self.plugins.contains_key(&key) {
            return Err(format!("plugin already registered: {key}"));
        }
        tracing::info!("Registered plugin: {key}");
        self.plugins.insert(key, plugin);
        Ok(())
    }

    /// Get info for a specific plugin.
    pub fn get_info(&self, key: &PluginKey) -> Option<PluginInfo> {
        self.plugins.get(key).map(|p| p.info())
    }

    /// List info for all registered plugins.
    pub fn list(&self) -> Vec<PluginInfo> {
        self.plugins.values().map(|p| p.info()).collect()
    }

    /// List info for all plugins in a given category.
    pub fn list_by_category(&self, category: &PluginCategory) -> Vec<PluginInfo> {
        self.plugins
            .iter()
            .filter(|(k, _)| &k.category == category)
            .map(|(_, p)| p.info())
            .collect()
    }

    /// Run a plugin by key for one account invocation.
    pub async fn run(&self, key: &PluginKey, ctx: &RunContext) -> Result<(), String> {
        match self.plugins.get(key) {
            Some(plugin) => plugin.run(ctx).await,
            None => Err(format!("plugin not found: {key}")),
        }
    }

    /// Return the total number of registered plugins.
    pub fn count(&self) -> usize {
        self.plugins.len()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

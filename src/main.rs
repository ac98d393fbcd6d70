use anyhow::Result;
use clap::{Parser, Subcommand};
use gram_plugins::{PluginCategory, PluginKey, PluginRegistry, RunContext};
use gram_telegram::TelegramReports;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gram-kit",
    about = "Session reporting and follow-source tools for an Instagram bot",
    version,
    author
)]
struct Cli {
    /// Root directory holding per-account folders
    #[arg(long, global = true, default_value = "accounts")]
    accounts_root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the session log and send a Telegram report
    Report {
        /// Account username (the folder name under the accounts root)
        #[arg(short, long)]
        username: String,

        /// Live follower count; defaults to the last session's snapshot
        #[arg(long)]
        followers: Option<i64>,

        /// Live following count; defaults to the last session's snapshot
        #[arg(long)]
        following: Option<i64>,
    },

    /// Refresh the blogger-followers source list for an account
    Sources {
        /// Account username (the folder name under the accounts root)
        #[arg(short, long)]
        account: String,

        /// Newline-delimited file of newly scraped usernames to merge in
        #[arg(long)]
        scraped: Option<PathBuf>,
    },

    /// List registered plugins
    Plugins,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Build the plugin registry with all built-in plugins.
    let mut registry = PluginRegistry::new();
    registry
        .register(Box::new(TelegramReports::new()))
        .map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Report {
            username,
            followers,
            following,
        } => {
            let ctx = RunContext {
                username,
                accounts_root: cli.accounts_root,
                followers_now: followers,
                following_now: following,
            };
            let key = PluginKey::new(PluginCategory::Report, gram_telegram::PLUGIN_NAME);
            registry.run(&key, &ctx).await.map_err(anyhow::Error::msg)?;
        }
        Commands::Sources { account, scraped } => {
            let account_dir = cli.accounts_root.join(&account);
            match gram_sources::update_blogger_followers(&account_dir, scraped.as_deref()) {
                Ok(outcome) => tracing::info!(
                    "Updated blogger-followers for {}: {} kept, {} removed, {} appended",
                    account,
                    outcome.retained,
                    outcome.removed,
                    outcome.appended
                ),
                Err(e) => tracing::error!("Failed to update follow list for {}: {}", account, e),
            }
        }
        Commands::Plugins => {
            let mut plugins = registry.list();
            plugins.sort_by(|a, b| a.name.cmp(&b.name));
            for info in plugins {
                println!(
                    "[{:?}] {} v{}: {}",
                    info.category, info.name, info.version, info.description
                );
            }
        }
    }

    Ok(())
}

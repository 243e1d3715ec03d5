//! CLI administration tool for refbot.
//!
//! Runs link conversions against the live services and inspects the bot's
//! database without going through Telegram.
//!
//! # Usage
//!
//! ```bash
//! # Convert a link the way the bot would
//! cargo run --bin refbot-admin -- convert https://amzn.to/2lVEfGs --shorten
//!
//! # Requests of the last 3 days
//! cargo run --bin refbot-admin -- requests --days 3
//!
//! # View statistics
//! cargo run --bin refbot-admin -- stats
//!
//! # Check database connection
//! cargo run --bin refbot-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the bot itself, see [`refbot::config`].

use refbot::config::{self, Config};
use refbot::domain::repositories::{RequestRepository, UserRepository};
use refbot::infrastructure::persistence::{PgRequestRepository, PgUserRepository};
use refbot::infrastructure::shortener::{LinkShortener, NullShortener};
use refbot::server::{build_pipeline, build_shortener, connect_database};
use refbot::utils::formatting::format_date;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing refbot.
#[derive(Parser)]
#[command(name = "refbot-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the referral link for a URL
    Convert {
        url: String,

        /// Also shorten the result
        #[arg(short, long)]
        shorten: bool,
    },

    /// List recorded link requests
    Requests {
        /// How many days to look back
        #[arg(short, long, default_value_t = 7)]
        days: i64,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Convert { url, shorten } => convert(&config, &url, shorten).await?,
        Commands::Requests { days } => {
            let pool = connect_database(&config).await?;
            list_requests(pool, days).await?;
        }
        Commands::Stats => {
            let pool = connect_database(&config).await?;
            handle_stats(pool).await?;
        }
        Commands::Db { action } => {
            let pool = connect_database(&config).await?;
            handle_db_action(action, &pool).await?;
        }
    }

    Ok(())
}

/// Runs one URL through the referral pipeline.
///
/// Without `--shorten` the pass-through shortener is used, so no Bitly
/// quota is consumed.
async fn convert(config: &Config, url: &str, shorten: bool) -> Result<()> {
    println!("{}", "🔗 Convert link".bright_blue().bold());
    println!();
    println!("  Input:  {}", url.cyan());

    let shortener: Arc<dyn LinkShortener> = if shorten {
        build_shortener(config)?
    } else {
        Arc::new(NullShortener::new())
    };
    let pipeline = build_pipeline(config, shortener)?;

    match pipeline.convert(url).await {
        Ok(result) => {
            println!("  Output: {}", result.bright_green().bold());
        }
        Err(e) => {
            println!("  {} {}", "❌".red(), e.kind().red().bold());
            println!("  {}", e.to_string().bright_black());
        }
    }
    println!();

    Ok(())
}

/// Prints requests of the last `days` days, oldest first.
async fn list_requests(pool: PgPool, days: i64) -> Result<()> {
    println!(
        "{}",
        format!("📋 Requests (last {} days)", days).bright_blue().bold()
    );
    println!();

    let repo = PgRequestRepository::new(Arc::new(pool));
    let since = lookback_start(Utc::now(), days)?;
    let requests = repo
        .list_since(since)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list requests: {}", e))?;

    if requests.is_empty() {
        println!("{}", "  No requests found".yellow());
        return Ok(());
    }

    println!(
        "  {:<25} {:<12} {}",
        "Date".bright_white().bold(),
        "User".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for request in &requests {
        println!(
            "  {:<25} {:<12} {}",
            format_date(&request.created_at).bright_black(),
            request.telegram_id.to_string().cyan(),
            request.url
        );
    }

    println!();
    println!(
        "  Total: {}",
        requests.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Start of a look-back window of `days` days ending at `now`.
fn lookback_start(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(days.max(0))
        .and_then(|window| now.checked_sub_signed(window))
        .with_context(|| format!("--days {} is out of range", days))
}

/// Displays user and request counts.
async fn handle_stats(pool: PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool);
    let users = PgUserRepository::new(pool.clone());
    let requests = PgRequestRepository::new(pool);

    let users_count = users
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
    let reachable_count = users
        .list_reachable()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .len();
    let requests_count = requests
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Users:           {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Reachable users: {}",
        reachable_count.to_string().bright_green().bold()
    );
    println!(
        "  Requests:        {}",
        requests_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, outbound client setup, service wiring, and
//! the Axum server lifecycle.

use crate::application::services::{
    CommandService, PipelineService, ReferralUrlBuilder, UpdateService,
};
use crate::config::Config;
use crate::domain::repositories::{RequestRepository, UserRepository};
use crate::infrastructure::pacer::GovernorPacer;
use crate::infrastructure::persistence::{PgRequestRepository, PgUserRepository};
use crate::infrastructure::resolver::HttpRedirectResolver;
use crate::infrastructure::shortener::{BitlyShortener, LinkShortener, NullShortener};
use crate::infrastructure::telegram::{BotApiTransport, ChatTransport};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool using the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Bitly when a key is configured, otherwise a pass-through shortener.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_shortener(config: &Config) -> Result<Arc<dyn LinkShortener>> {
    match &config.bitly_key {
        Some(key) => {
            let bitly = BitlyShortener::new(
                &config.bitly_api_url,
                key.clone(),
                config.bitly_domain.clone(),
                config.http_timeout(),
            )
            .context("Failed to build Bitly client")?;
            tracing::info!("Shortener enabled (Bitly)");
            Ok(Arc::new(bitly))
        }
        None => {
            tracing::warn!("BITLY_KEY not set, links will not be shortened");
            Ok(Arc::new(NullShortener::new()))
        }
    }
}

/// Wires the resolver, the referral builder and the shortener together.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built or the referral
/// settings are invalid.
pub fn build_pipeline(
    config: &Config,
    shortener: Arc<dyn LinkShortener>,
) -> Result<Arc<PipelineService>> {
    let resolver = HttpRedirectResolver::new(config.http_timeout(), config.max_redirects)
        .context("Failed to build redirect resolver")?;

    let builder = ReferralUrlBuilder::new(Arc::new(resolver), config.referral_settings()?);

    Ok(Arc::new(PipelineService::new(Arc::new(builder), shortener)))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redirect resolver, shortener (Bitly or pass-through) and Bot API client
/// - Broadcast pacer
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - An HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let requests: Arc<dyn RequestRepository> = Arc::new(PgRequestRepository::new(pool));

    let transport: Arc<dyn ChatTransport> = Arc::new(
        BotApiTransport::new(
            &config.telegram_api_url,
            &config.telegram_token,
            config.http_timeout(),
        )
        .context("Failed to build Bot API client")?,
    );

    let shortener = build_shortener(&config)?;
    let pipeline = build_pipeline(&config, shortener.clone())?;

    let pacer = Arc::new(GovernorPacer::new(config.broadcast_interval()));
    let commands = Arc::new(CommandService::new(
        users.clone(),
        requests.clone(),
        transport.clone(),
        pacer,
    ));

    let update_service = Arc::new(UpdateService::new(
        pipeline,
        commands,
        users.clone(),
        requests,
        transport,
    ));

    let state = AppState::new(
        update_service,
        users,
        shortener,
        config.webhook_secret.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsfeed_service::config::Config;
use newsfeed_service::handlers::{self, FeedHandlerState};
use newsfeed_service::repository::{PostgresContentRepository, PostgresFollowGraphRepository};
use newsfeed_service::services::{FeedAggregator, ResourceResolver};

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsfeed_service=info,actix_web=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_target(true),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("newsfeed-service failed: {:#}", e);
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!("Starting newsfeed-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_cfg = db_pool::DbConfig::new("newsfeed-service", &config.database.url)
        .with_connections(
            config.database.max_connections,
            config.database.min_connections,
        )
        .with_acquire_timeout(config.database.acquire_timeout_secs);
    db_cfg.log_config();
    let pool = db_pool::create_pool(db_cfg)
        .await
        .context("Failed to create database pool")?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let resolver = ResourceResolver::new(config.storage.media_root.clone());
    match resolver.media_root() {
        Some(root) => tracing::info!(media_root = %root.display(), "Relative locators enabled"),
        None => tracing::warn!("MEDIA_ROOT not set; relative storage locators will fail"),
    }

    let aggregator = FeedAggregator::new(
        Arc::new(PostgresFollowGraphRepository::new(pool.clone())),
        Arc::new(PostgresContentRepository::new(pool)),
        resolver,
    )
    .with_resolve_concurrency(config.feed.resolve_concurrency);

    let state = web::Data::new(FeedHandlerState {
        aggregator: Arc::new(aggregator),
        config: config.feed.clone(),
    });

    let bind_addr = (config.app.host.clone(), config.app.port);
    tracing::info!("HTTP server listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server terminated")?;

    Ok(())
}

use anyhow::Context;
use flights_api::{app, server, AppState};
use flights_store::app_config::{Config, ServerMode};
use flights_store::{flights_service, DbClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn default_filter(mode: ServerMode) -> &'static str {
    match mode {
        ServerMode::Debug => "flights_api=debug,flights_store=debug,tower_http=debug",
        ServerMode::Release => "info",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(config.server.mode).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting flights API on port {}", config.server.port);

    let db = DbClient::new(&config.database)
        .await
        .context("Failed to connect to Postgres")?;

    if config.database.run_migrations {
        db.migrate().await.context("Failed to run migrations")?;
    }

    let db = Arc::new(db);
    let state = AppState::new(flights_service(&db), db.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    server::serve(
        listener,
        app(state),
        server::shutdown_signal(),
        config.server.shutdown_timeout(),
    )
    .await?;

    db.close().await;
    tracing::info!("Database pool closed");
    Ok(())
}

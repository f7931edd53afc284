use anyhow::Context;
use clap::Parser;
use school_locator::adapters::http::{build_router, serve, shutdown_signal};
use school_locator::utils::logger;
use school_locator::{connect, CliConfig, SchoolService, SqliteSchoolStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    logger::init_logger(&config.logging.format, cli.verbose, config.logging.level.as_deref());

    tracing::info!("Starting school-locator");
    tracing::debug!("Resolved config: {:?}", config);

    let pool = connect(&config.pool_settings())
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;
    let store = SqliteSchoolStore::new(pool);
    store
        .init_schema()
        .await
        .context("Failed to initialize database schema")?;

    let service = Arc::new(SchoolService::with_retry_policy(
        store.clone(),
        config.retry_policy(),
    ));
    let router = build_router(service, &config.http_settings());

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.socket_addr()))?;

    let result = serve(listener, router, shutdown_signal()).await;

    store.close().await;
    tracing::info!("Database pool closed");

    result.context("Server error")
}

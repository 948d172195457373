use ua_server::{AppState, build_router, error::ServerError, logger};

use ua_auth::TokenService;

use std::net::SocketAddr;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The logger may not be up yet; make sure the reason reaches the operator.
            error!("Fatal: {}", e);
            eprintln!("ua-server: fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    // Load and validate configuration
    let config = ua_config::Config::load()?;

    let log_file_path = config.logging.file.as_ref().map(std::path::PathBuf::from);
    if let Some(parent) = log_file_path.as_ref().and_then(|p| p.parent())
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    config.validate()?;

    info!("Starting ua-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_url = config.database.url.as_deref().unwrap_or_default();
    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(ua_db::DbError::from)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await
        .map_err(ua_db::DbError::from)?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    ua_db::MIGRATOR
        .run(&pool)
        .await
        .map_err(ua_db::DbError::from)?;
    info!("Migrations complete");

    let tokens = TokenService::with_ttl(
        config.auth.jwt_secret_bytes(),
        chrono::Duration::hours(config.auth.token_ttl_hours),
    );
    info!("JWT: HS256, {}h lifetime", config.auth.token_ttl_hours);

    let app = build_router(AppState::new(pool.clone(), tokens));

    // Create TCP listener
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

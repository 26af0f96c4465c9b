//! # Tally Server
//!
//! Main entry point for the Tally service: loads configuration, connects
//! the database pool and cache, wires the DI module, and serves the REST
//! API until shutdown.

use std::sync::Arc;
use tally_config::ConfigLoader;
use tally_core::{HasComponent, TallyError, TallyResult};
use tally_repository::create_pool;
use tally_rest::{create_router, AppState};
use tally_service::TodoService;
use tokio::signal;
use tracing::{error, info};

mod di;
mod startup;

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting Tally server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> TallyResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    info!("Environment: {}", config.app.environment);
    info!("Instance: {}", config.app.instance_name);

    // Create database pool and bring the schema up to date
    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    // Build DI module - centralized dependency injection
    let module = di::build_app_module(&db_pool, &config.redis)?;

    // Resolve the service from the DI container
    let todo_service: Arc<dyn TodoService> = module.resolve();

    // Create application state and router
    let state = AppState::new(todo_service, config.app.instance_name.clone());
    let router = create_router(state, &config.server);

    startup::print_banner();
    startup::print_startup_info(&config.server, &config.app.instance_name);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TallyError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TallyError::Internal(format!("Server error: {}", e)))?;

    // Release shared resources once the server has drained
    db_pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};

use stagebook::db;
use stagebook::server::config::ServerConfig;
use stagebook::server::logging::init_logging;
use stagebook::web::{create_axum_router, templates::load_templates};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Insert the sample venues, artists and shows when the database is empty
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    dotenv().ok();

    let server_config = ServerConfig::load(args.config.as_deref())?;
    let _log_guard = init_logging(&server_config.log_dir);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting stagebook server.");

    // --- Database Setup ---
    let db_pool = match db::connect(&server_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Failed to connect to the database.");
            return Err(e.into());
        }
    };
    db::ensure_schema(&db_pool).await?;

    if args.seed {
        db::seed::seed_if_empty(&db_pool).await?;
    }

    // --- Web Server Setup ---
    let templates = Arc::new(load_templates()?);
    let app = create_axum_router(db_pool, templates);

    let listener = TcpListener::bind(&server_config.listen_addr).await?;
    info!(addr = %server_config.listen_addr, "HTTP server listening.");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal.");
    }
}

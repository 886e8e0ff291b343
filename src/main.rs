//! Foodlog Server
//!
//! Stores food log entries in SQLite and serves them over HTTP.
//!
//! # Configuration
//!
//! Environment variables (a `.env` file is loaded if present):
//! - `PORT`: Port to listen on (default: 3001)
//! - `FOODLOG_DATABASE_PATH`: SQLite file (default: ~/.local/share/foodlog-server/foodlog.db)
//! - `FOODLOG_ENV`: `production` disables deleting all logs
//!
//! # Endpoints
//!
//! - `GET /`: Liveness probe
//! - `GET /api/foodlogs`: All food logs
//! - `POST /api/foodlogs`: Create a food log
//! - `DELETE /api/foodlogs`: Delete every food log (development only)

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod server;

use config::ServerConfig;
use db::{init_db, FoodLogRepository};
use server::{router, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodlog_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    tracing::info!("Database: {}", config.database_path.display());
    tracing::info!("Environment: {}", config.environment);

    let pool = init_db(&config.database_path).await?;
    let state = AppState::new(FoodLogRepository::new(pool), config.environment);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

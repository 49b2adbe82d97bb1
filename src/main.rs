use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use valorant_stats_api::config::{self, Config};
use valorant_stats_api::db::PgPlayerStore;

#[tokio::main]
async fn main() {
    // RUST_LOG may come from .env, so load it before the subscriber reads it.
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting api server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    };

    // Create database connection pool
    let store = PgPlayerStore::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connection established.");

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config::LISTEN_PORT));
    let app = valorant_stats_api::app(Arc::new(store));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}

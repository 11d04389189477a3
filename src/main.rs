mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::maps::PgMapRepo;
use services::storage::StorageClient;

#[tokio::main]
async fn main() {
    // A missing .env is normal outside development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("database init failed");

    let storage = StorageClient::new(&config.storage).expect("storage client init failed");
    tracing::info!(bucket = storage.bucket(), "storage client initialized");

    let state = state::AppState::new(Arc::new(PgMapRepo::new(pool)), Arc::new(storage), config.default_owner_id);

    let app = routes::app(state, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "deskmap listening");
    axum::serve(listener, app).await.expect("server failed");
}

// SPDX-License-Identifier: AGPL-3.0-or-later

use std::env;
use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use movies_server::api::router;
use movies_server::auth::AuthContext;
use movies_server::config::{load_jwt_secret, DATA_DIR_ENV, DEFAULT_DATA_DIR};
use movies_server::state::AppState;
use movies_server::storage::{FileStorage, StoragePaths};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    if format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Refuse to start without a signing secret.
    let secret = load_jwt_secret().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let mut storage = FileStorage::new(StoragePaths::new(&data_dir));
    storage
        .initialize()
        .unwrap_or_else(|e| panic!("Failed to initialize storage at {data_dir}: {e}"));
    tracing::info!(data_dir, "storage initialized");

    let state = AppState::new(storage, AuthContext::new(secret));
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("movies server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install shutdown signal handler");
    tracing::info!("shutdown signal received");
}

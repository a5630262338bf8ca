//! Record gateway for the ads dashboard.
//!
//!
//!
//! # General Infrastructure
//! - Ads live in a hosted Supabase project, table `ads_data`
//! - This server is the only thing holding the Supabase key
//! - Dashboard clients talk to this server, never to Supabase directly
//! - One endpoint, one query, no writes
//!
//!
//!
//! # Endpoint
//!
//! `GET /api/fetchallAds`
//!
//! - No body, no query parameters
//! - 200: JSON array of rows, newest `created_at` first, at most 200
//! - 500: `{"error": "<message>"}`
//!   - backend rejected the query: its own message
//!   - anything else: `An unexpected error occurred.`
//!
//! No caching and no retries. A failed fetch is final for that page load, the
//! dashboard logs it and shows an empty table.
//!
//!
//!
//! # Notes
//!
//! ## Why the 200 cap
//! Filtering, search and pagination all run on the client over the full batch.
//! 200 rows keeps that batch small enough to recompute on every keystroke.
//!
//!
//!
//! # Setup
//!
//! Required environment.
//! ```sh
//! export SUPABASE_URL=https://<project>.supabase.co
//! export SUPABASE_KEY=<anon key>   # or mount /run/secrets/SUPABASE_KEY
//! export RUST_PORT=1111            # optional
//! export RUST_LOG=info
//! ```
//!
//! Run.
//! ```sh
//! cargo run -p ads
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

use config::Config;
use error::ServerError;
use routes::{FETCH_ALL_ADS_PATH, fetch_all_ads_handler};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(FETCH_ALL_ADS_PATH, get(fetch_all_ads_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server() -> Result<(), ServerError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config);

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;

                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::testing::{FakeStore, sample_rows, state};

    async fn serve(state: Arc<State>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.unwrap();
        });

        format!("http://{address}{FETCH_ALL_ADS_PATH}")
    }

    #[tokio::test]
    async fn test_endpoint_returns_rows_as_json_array() {
        let url = serve(state(FakeStore::Rows(sample_rows(3)))).await;

        let response = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body.as_array().map(Vec::len), Some(3));
        assert_eq!(body[0]["id"], json!(0));
    }

    #[tokio::test]
    async fn test_endpoint_reports_backend_message() {
        let url = serve(state(FakeStore::QueryFailure("connection refused"))).await;

        let response = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "connection refused"}));
    }

    #[tokio::test]
    async fn test_endpoint_reports_generic_message_on_unexpected_failure() {
        let url = serve(state(FakeStore::Unexpected)).await;

        let response = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "An unexpected error occurred."}));
    }

    #[tokio::test]
    async fn test_endpoint_only_answers_get() {
        let url = serve(state(FakeStore::Rows(Vec::new()))).await;

        let response = reqwest::Client::new().post(&url).send().await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}

//! # Supabase
//!
//! Hosted Postgres behind a PostgREST API. Holds every ad in one table.
//!
//! ## Schema
//! - Table `ads_data`
//! - Columns: id, description, video_link, image_link, URL, CTA, Start_Date, tag, created_at
//! - Column names are case sensitive, `URL`, `CTA` and `Start_Date` are uppercase on purpose
//!
//!
//!
//! ## Query
//! Exactly one read, never a write.
//! ```text
//! GET {SUPABASE_URL}/rest/v1/ads_data?select=*&order=created_at.desc&limit=200
//! apikey: {SUPABASE_KEY}
//! Authorization: Bearer {SUPABASE_KEY}
//! ```
//!
//! Rows are relayed untouched. All shaping happens on the dashboard side, so
//! the store does not know about fallbacks or display rules.
//!
//!
//!
//! ## Errors
//! - Non-success status: PostgREST puts a human readable `message` in the body,
//!   that message is what the gateway hands back to the dashboard
//! - Anything else (connect failure, body that is not a row array) is unexpected
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;

pub const ADS_TABLE: &str = "ads_data";
pub const ORDER_COLUMN: &str = "created_at";
pub const FETCH_LIMIT: usize = 200;

pub type Row = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Query(String),

    #[error("Unexpected store failure: {0}")]
    Unexpected(String),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Newest rows first, at most `limit` of them.
    async fn latest_ads(&self, limit: usize) -> Result<Vec<Row>, StoreError>;
}

pub struct RestStore {
    client: Client,
    base_url: String,
    key: String,
}

impl RestStore {
    pub fn new(base_url: &str, key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{ADS_TABLE}", self.base_url)
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn latest_ads(&self, limit: usize) -> Result<Vec<Row>, StoreError> {
        let order = format!("{ORDER_COLUMN}.desc");
        let limit = limit.to_string();

        let response = self
            .client
            .get(self.table_url())
            .query(&[
                ("select", "*"),
                ("order", order.as_str()),
                ("limit", limit.as_str()),
            ])
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .await
            .map_err(|e| StoreError::Unexpected(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Unexpected(e.to_string()))?;

        if !status.is_success() {
            return Err(StoreError::Query(backend_message(&body)));
        }

        serde_json::from_str(&body).map_err(|e| StoreError::Unexpected(e.to_string()))
    }
}

pub fn backend_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::get,
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{address}")
    }

    async fn rows_handler(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        let authorized = headers.get("apikey").and_then(|v| v.to_str().ok()) == Some("anon")
            && headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer anon");

        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad key"})));
        }

        let expected = [("select", "*"), ("order", "created_at.desc"), ("limit", "200")];
        for (key, value) in expected {
            if params.get(key).map(String::as_str) != Some(value) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": format!("unexpected {key}")})),
                );
            }
        }

        (
            StatusCode::OK,
            Json(json!([
                {"id": 2, "CTA": "Shop Now", "created_at": "2024-05-02T00:00:00+00:00"},
                {"id": 1, "CTA": null, "created_at": "2024-05-01T00:00:00+00:00"}
            ])),
        )
    }

    #[test]
    fn test_backend_message_prefers_message_field() {
        let body = r#"{"code":"42P01","message":"relation \"ads_data\" does not exist"}"#;

        assert_eq!(backend_message(body), "relation \"ads_data\" does not exist");
    }

    #[test]
    fn test_backend_message_falls_back_to_error_then_raw_body() {
        assert_eq!(backend_message(r#"{"error":"Invalid API key"}"#), "Invalid API key");
        assert_eq!(backend_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_rest_store_sends_bounded_ordered_query() {
        let url = serve(Router::new().route("/rest/v1/ads_data", get(rows_handler))).await;
        let store = RestStore::new(&url, "anon");

        let rows = store.latest_ads(FETCH_LIMIT).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], json!(2));
        assert_eq!(rows[1]["CTA"], Value::Null);
    }

    #[tokio::test]
    async fn test_rest_store_maps_backend_error_to_query() {
        let url = serve(Router::new().route("/rest/v1/ads_data", get(rows_handler))).await;
        let store = RestStore::new(&url, "wrong");

        let result = store.latest_ads(FETCH_LIMIT).await;

        assert!(matches!(result, Err(StoreError::Query(message)) if message == "bad key"));
    }

    #[tokio::test]
    async fn test_rest_store_rejects_non_array_body() {
        let router = Router::new().route(
            "/rest/v1/ads_data",
            get(|| async { Json(json!({"rows": []})) }),
        );
        let url = serve(router).await;
        let store = RestStore::new(&url, "anon");

        let result = store.latest_ads(FETCH_LIMIT).await;

        assert!(matches!(result, Err(StoreError::Unexpected(_))));
    }

    #[tokio::test]
    async fn test_rest_store_connect_failure_is_unexpected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let store = RestStore::new(&format!("http://{address}"), "anon");

        let result = store.latest_ads(FETCH_LIMIT).await;

        assert!(matches!(result, Err(StoreError::Unexpected(_))));
    }
}

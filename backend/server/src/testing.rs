use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    config::Config,
    state::State,
    store::{RecordStore, Row, StoreError},
};

pub enum FakeStore {
    Rows(Vec<Row>),
    QueryFailure(&'static str),
    Unexpected,
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn latest_ads(&self, limit: usize) -> Result<Vec<Row>, StoreError> {
        match self {
            FakeStore::Rows(rows) => Ok(rows.iter().take(limit).cloned().collect()),
            FakeStore::QueryFailure(message) => Err(StoreError::Query(message.to_string())),
            FakeStore::Unexpected => Err(StoreError::Unexpected("socket closed".into())),
        }
    }
}

/// Remembers the limit the caller asked for.
#[derive(Default)]
pub struct RecordingStore {
    pub requested_limit: AtomicUsize,
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn latest_ads(&self, limit: usize) -> Result<Vec<Row>, StoreError> {
        self.requested_limit.store(limit, Ordering::SeqCst);

        Ok(Vec::new())
    }
}

pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("row must be an object, got {other}"),
    }
}

pub fn sample_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            row(json!({
                "id": i,
                "description": format!("ad number {i}"),
                "CTA": if i % 2 == 0 { "Shop Now" } else { "Learn More" },
                "created_at": format!("2024-05-01T00:{:02}:00+00:00", i % 60),
            }))
        })
        .collect()
}

pub fn state(store: FakeStore) -> Arc<State> {
    state_with(Arc::new(store))
}

pub fn state_with(store: Arc<dyn RecordStore>) -> Arc<State> {
    let config = Config {
        port: 0,
        supabase_url: "http://supabase.invalid".into(),
        supabase_key: "anon".into(),
    };

    State::with_store(config, store)
}

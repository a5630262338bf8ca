use std::sync::Arc;

use axum::{Json, extract};
use tracing::{error, info};

use crate::{
    error::AppError,
    state::State,
    store::{FETCH_LIMIT, Row},
};

pub const FETCH_ALL_ADS_PATH: &str = "/api/fetchallAds";

pub async fn fetch_all_ads_handler(
    extract::State(state): extract::State<Arc<State>>,
) -> Result<Json<Vec<Row>>, AppError> {
    let rows = state.store.latest_ads(FETCH_LIMIT).await.map_err(|e| {
        error!("Error fetching ads: {e}");

        AppError::from(e)
    })?;

    info!("Fetched {} ads", rows.len());

    Ok(Json(rows))
}

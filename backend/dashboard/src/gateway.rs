use reqwest::Client;
use serde::Deserialize;

use crate::{error::LoadError, record::RawRecord};

pub const FETCH_ALL_ADS_PATH: &str = "/api/fetchallAds";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{FETCH_ALL_ADS_PATH}", self.base_url)
    }

    pub async fn fetch_all_ads(&self) -> Result<Vec<RawRecord>, LoadError> {
        let response = self.client.get(self.endpoint()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|payload| payload.error)
                .unwrap_or(body);

            return Err(LoadError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

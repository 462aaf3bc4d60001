use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::format::truncate;
use crate::leaderboard::{CampaignLeaderboard, MapLeaderboard};

const MAX_ERROR_BODY_CHARS: usize = 1200;
const MAX_MALFORMED_BODY_CHARS: usize = 300;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API error {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed API response: {body}")]
    Malformed { body: String },
    #[error("could not reach the leaderboard API: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Read-only client for the India leaderboard API.
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn refresh_before_campaign(&self) -> bool {
        self.config.refresh_before_campaign
    }

    pub async fn map_top10(&self, tmx_id: &str) -> Result<MapLeaderboard, ApiError> {
        let url = format!("{}/map/india-top10/{}", self.config.base_url, tmx_id.trim());
        self.fetch_json(&url).await
    }

    pub async fn campaign_top10(&self) -> Result<CampaignLeaderboard, ApiError> {
        let url = format!("{}/india-top10", self.config.base_url);
        self.fetch_json(&url).await
    }

    /// Ask the API to refresh its cached campaign data.
    pub async fn refresh(&self) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/refresh", self.config.base_url);
        self.fetch_json(&url).await
    }

    /// GET `url` and decode the body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!("Failed to decode response from {}: {}", url, e);
            ApiError::Malformed {
                body: truncate(&body, MAX_MALFORMED_BODY_CHARS),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;
    use axum::http::StatusCode as MockStatus;
    use serde_json::json;

    fn client(api: &MockApi) -> ApiClient {
        ApiClient::new(ApiConfig::new(&api.base_url)).unwrap()
    }

    #[tokio::test]
    async fn test_map_top10_hits_map_endpoint() {
        let api = MockApi::start(vec![(
            "/map/india-top10/273080",
            MockStatus::OK,
            json!({ "top10": [{ "displayName": "A", "timeOrScore": 1 }], "mapName": "M" })
                .to_string(),
        )])
        .await;

        let map = client(&api).map_top10(" 273080 ").await.unwrap();

        assert_eq!(map.entries().len(), 1);
        assert_eq!(map.title("273080"), "M");
        assert_eq!(api.hits(), 1);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let api = MockApi::start(vec![(
            "/india-top10",
            MockStatus::OK,
            json!({ "top10": [] }).to_string(),
        )])
        .await;
        let config = ApiConfig::new(&format!("{}/", api.base_url));

        let campaign = ApiClient::new(config)
            .unwrap()
            .campaign_top10()
            .await
            .unwrap();

        assert!(campaign.entries().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_body_truncated() {
        let api = MockApi::start(vec![(
            "/india-top10",
            MockStatus::INTERNAL_SERVER_ERROR,
            "e".repeat(2000),
        )])
        .await;

        let err = client(&api).campaign_top10().await.unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let api = MockApi::start(vec![(
            "/india-top10",
            MockStatus::OK,
            format!("not json {}", "!".repeat(500)),
        )])
        .await;

        let err = client(&api).campaign_top10().await.unwrap_err();

        match err {
            ApiError::Malformed { body } => {
                assert!(body.starts_with("not json"));
                assert_eq!(body.chars().count(), MAX_MALFORMED_BODY_CHARS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_malformed() {
        let api = MockApi::start(vec![(
            "/india-top10",
            MockStatus::OK,
            json!({ "top10": "nope" }).to_string(),
        )])
        .await;

        let err = client(&api).campaign_top10().await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let base_url = MockApi::unused_base_url().await;
        let client = ApiClient::new(ApiConfig::new(&base_url)).unwrap();

        let err = client.campaign_top10().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}

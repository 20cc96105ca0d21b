//! Swap faucet client (token drips for USDC and friends).

use std::time::Duration;

use alloy::primitives::Address;
use serde::Serialize;

use crate::api::client::{browser_headers, check_status};
use crate::api::types::{ApiError, ZenithResponse};
use crate::config::ApiConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClaimRequest {
    token_address: String,
    user_address: String,
}

/// Client for the swap faucet endpoint.
#[derive(Debug, Clone)]
pub struct ZenithFaucet {
    http: reqwest::Client,
    url: String,
}

impl ZenithFaucet {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .default_headers(browser_headers(config)?)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.zenith_faucet_url.clone(),
        })
    }

    /// Request `token` for `user`; returns the faucet's transaction hash.
    pub async fn claim(&self, token: Address, user: Address) -> Result<String, ApiError> {
        let body = ClaimRequest {
            token_address: token.to_string(),
            user_address: user.to_string(),
        };

        let response = self.http.post(&self.url).json(&body).send().await?;
        let response = check_status(response).await?;
        response.json::<ZenithResponse>().await?.into_tx_hash()
    }
}

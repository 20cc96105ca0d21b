//! Typed client for the network's REST API.
//!
//! # Endpoints
//! - `POST /user/login?address&signature&invite_code` → JWT
//! - `POST /sign/in?address` → daily check-in
//! - `GET  /user/profile?address` → points
//! - `GET  /faucet/status?address` → claim window
//! - `POST /faucet/daily?address` → claim
//! - `POST /task/verify` (form: address, task_id) → verified flag

use std::time::Duration;

use alloy::primitives::Address;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_LENGTH, ORIGIN,
    REFERER, USER_AGENT,
};
use serde::de::DeserializeOwned;

use crate::api::types::{
    ApiEnvelope, ApiError, FaucetStatus, LoginData, ProfileData, TaskVerification,
};
use crate::config::ApiConfig;

/// Default headers mimicking the browser front-end.
pub fn browser_headers(config: &ApiConfig) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-site"));
    headers.insert(ORIGIN, header_value(&config.origin)?);
    headers.insert(REFERER, header_value(&config.referer)?);
    headers.insert(USER_AGENT, header_value(&config.user_agent)?);
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| ApiError::Header(format!("'{}': {}", value, e)))
}

fn bearer(token: &str) -> Result<HeaderValue, ApiError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ApiError::Header("authorization token".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Turn a non-success status into `ApiError::Status`, keeping the server message.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("msg")
                .or_else(|| json.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Client for the network API.
#[derive(Debug, Clone)]
pub struct PharosApi {
    http: reqwest::Client,
    base_url: String,
    invite_code: String,
}

impl PharosApi {
    /// Create a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .default_headers(browser_headers(config)?)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            invite_code: config.invite_code.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let response = check_status(response).await?;
        Ok(response.json::<ApiEnvelope<T>>().await?)
    }

    /// Log in with a signed message and return the session JWT.
    pub async fn login(&self, address: Address, signature: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/user/login"))
            .query(&[
                ("address", address.to_string().as_str()),
                ("signature", signature),
                ("invite_code", self.invite_code.as_str()),
            ])
            .header(AUTHORIZATION, "Bearer null")
            .header(CONTENT_LENGTH, "0")
            .send()
            .await?;

        let data: LoginData = Self::decode(response).await?.into_data("jwt")?;
        Ok(data.jwt)
    }

    /// Daily check-in.
    pub async fn check_in(&self, address: Address, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/sign/in"))
            .query(&[("address", address.to_string())])
            .header(AUTHORIZATION, bearer(token)?)
            .header(CONTENT_LENGTH, "0")
            .send()
            .await?;

        Self::decode::<serde_json::Value>(response).await?.ensure_ok()
    }

    /// Total points of the account.
    pub async fn profile(&self, address: Address, token: &str) -> Result<u64, ApiError> {
        let response = self
            .http
            .get(self.url("/user/profile"))
            .query(&[("address", address.to_string())])
            .header(AUTHORIZATION, bearer(token)?)
            .send()
            .await?;

        let data: ProfileData = Self::decode(response).await?.into_data("user_info")?;
        Ok(data.user_info.total_points)
    }

    /// Whether the faucet can be claimed now, and when otherwise.
    pub async fn faucet_status(
        &self,
        address: Address,
        token: &str,
    ) -> Result<FaucetStatus, ApiError> {
        let response = self
            .http
            .get(self.url("/faucet/status"))
            .query(&[("address", address.to_string())])
            .header(AUTHORIZATION, bearer(token)?)
            .send()
            .await?;

        Self::decode(response).await?.into_data("faucet status")
    }

    /// Claim the daily faucet.
    pub async fn claim_faucet(&self, address: Address, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/faucet/daily"))
            .query(&[("address", address.to_string())])
            .header(AUTHORIZATION, bearer(token)?)
            .header(CONTENT_LENGTH, "0")
            .send()
            .await?;

        Self::decode::<serde_json::Value>(response).await?.ensure_ok()
    }

    /// Submit a social task for verification.
    ///
    /// Returns whether the server marked the task verified.
    pub async fn verify_task(
        &self,
        address: Address,
        token: &str,
        task_id: u32,
    ) -> Result<bool, ApiError> {
        let response = self
            .http
            .post(self.url("/task/verify"))
            .header(AUTHORIZATION, bearer(token)?)
            .form(&[("address", address.to_string()), ("task_id", task_id.to_string())])
            .send()
            .await?;

        let data: TaskVerification = Self::decode(response).await?.into_data("verification")?;
        Ok(data.verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_headers() {
        let headers = browser_headers(&ApiConfig::default()).unwrap();
        assert_eq!(headers.get(ORIGIN).unwrap(), "https://testnet.pharosnetwork.xyz");
        assert!(headers.contains_key(USER_AGENT));
    }

    #[test]
    fn test_invalid_header_is_reported() {
        let config = ApiConfig {
            user_agent: "bad\nagent".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(browser_headers(&config), Err(ApiError::Header(_))));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..ApiConfig::default()
        };
        let api = PharosApi::new(&config).unwrap();
        assert_eq!(api.url("/sign/in"), "http://localhost:9000/sign/in");
    }
}

//! Response envelopes and payloads of the network API and the swap faucet.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resilience::Retryable;

/// Errors returned by the HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or body decoding failure.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The API answered but refused the request.
    #[error("{message} (code {code})")]
    Rejected { code: i64, message: String },

    /// The API answered success without the expected payload.
    #[error("response is missing {0}")]
    MissingData(&'static str),

    /// A configured header value is not valid HTTP.
    #[error("invalid header value: {0}")]
    Header(String),
}

impl Retryable for ApiError {
    fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(e) => !e.is_decode() && !e.is_builder(),
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            ApiError::Rejected { .. } | ApiError::MissingData(_) | ApiError::Header(_) => false,
        }
    }
}

/// `{ code, msg, data }` envelope used by every network API endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Fail unless `code == 0`.
    pub fn ensure_ok(&self) -> Result<(), ApiError> {
        if self.code != 0 {
            return Err(ApiError::Rejected {
                code: self.code,
                message: self.msg.clone().unwrap_or_else(|| "Unknown error".to_string()),
            });
        }
        Ok(())
    }

    /// Payload of a successful response.
    pub fn into_data(self, what: &'static str) -> Result<T, ApiError> {
        self.ensure_ok()?;
        self.data.ok_or(ApiError::MissingData(what))
    }
}

/// Payload of `POST /user/login`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginData {
    pub jwt: String,
}

/// Payload of `GET /faucet/status`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FaucetStatus {
    pub is_able_to_faucet: bool,
    /// Unix seconds of the next claim window. The API spells it this way.
    #[serde(default)]
    pub avaliable_timestamp: Option<i64>,
}

impl FaucetStatus {
    /// Next availability rendered in `timezone`, e.g. `2025-06-01 08:30:00 WIB`.
    pub fn next_available(&self, timezone: &str) -> Option<String> {
        let ts = self.avaliable_timestamp?;
        let utc = Utc.timestamp_opt(ts, 0).single()?;
        match timezone.parse::<chrono_tz::Tz>() {
            Ok(tz) => Some(utc.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string()),
            Err(_) => Some(utc.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        }
    }
}

/// Payload of `GET /user/profile`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileData {
    pub user_info: UserInfo,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserInfo {
    #[serde(rename = "TotalPoints", default)]
    pub total_points: u64,
}

/// Payload of `POST /task/verify`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskVerification {
    #[serde(default)]
    pub verified: bool,
}

/// `{ status, message, data: { txHash } }` envelope of the swap faucet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZenithResponse {
    pub status: u16,
    pub message: Option<String>,
    pub data: Option<ZenithClaim>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZenithClaim {
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
}

impl ZenithResponse {
    /// Transaction hash of a successful claim.
    pub fn into_tx_hash(self) -> Result<String, ApiError> {
        if self.status != 200 {
            return Err(ApiError::Rejected {
                code: self.status as i64,
                message: self.message.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }
        self.data
            .and_then(|d| d.tx_hash)
            .ok_or(ApiError::MissingData("txHash"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_rejection_uses_msg() {
        let envelope: ApiEnvelope<LoginData> =
            serde_json::from_str(r#"{"code": 1, "msg": "invalid signature"}"#).unwrap();
        let err = envelope.into_data("jwt").unwrap_err();
        assert_eq!(err.to_string(), "invalid signature (code 1)");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_envelope_missing_data() {
        let envelope: ApiEnvelope<LoginData> = serde_json::from_str(r#"{"code": 0}"#).unwrap();
        assert!(matches!(envelope.into_data("jwt"), Err(ApiError::MissingData("jwt"))));
    }

    #[test]
    fn test_faucet_status_next_available() {
        let status: FaucetStatus = serde_json::from_str(
            r#"{"is_able_to_faucet": false, "avaliable_timestamp": 1700000000}"#,
        )
        .unwrap();
        assert!(!status.is_able_to_faucet);
        // 2023-11-14 22:13:20 UTC is 2023-11-15 05:13:20 in Jakarta (UTC+7)
        let rendered = status.next_available("Asia/Jakarta").unwrap();
        assert!(rendered.starts_with("2023-11-15 05:13:20"));

        let fallback = status.next_available("Nowhere/Special").unwrap();
        assert_eq!(fallback, "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_profile_points() {
        let envelope: ApiEnvelope<ProfileData> = serde_json::from_str(
            r#"{"code": 0, "data": {"user_info": {"ID": 7, "TotalPoints": 1250}}}"#,
        )
        .unwrap();
        assert_eq!(envelope.into_data("profile").unwrap().user_info.total_points, 1250);
    }

    #[test]
    fn test_status_retryable() {
        let busy = ApiError::Status { status: 503, message: "busy".into() };
        let limited = ApiError::Status { status: 429, message: "slow down".into() };
        let denied = ApiError::Status { status: 401, message: "unauthorized".into() };
        assert!(busy.is_retryable());
        assert!(limited.is_retryable());
        assert!(!denied.is_retryable());
    }

    #[test]
    fn test_zenith_response() {
        let ok: ZenithResponse =
            serde_json::from_str(r#"{"status": 200, "data": {"txHash": "0xabc"}}"#).unwrap();
        assert_eq!(ok.into_tx_hash().unwrap(), "0xabc");

        let limited: ZenithResponse =
            serde_json::from_str(r#"{"status": 400, "message": "already claimed today"}"#).unwrap();
        assert_eq!(
            limited.into_tx_hash().unwrap_err().to_string(),
            "already claimed today (code 400)"
        );
    }
}

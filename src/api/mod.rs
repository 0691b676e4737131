//! Typed client for the Vancare backend.
//!
//! Thin request/response mapping over a configured base URL: every function
//! issues exactly one HTTP request and normalizes the body into plain data
//! or a typed error. Business logic (diagnosis, matching, estimation) lives
//! entirely on the other side of this interface.
//!
//! Failure policy: mutating operations propagate errors to the caller;
//! nice-to-have reads (file list, system info, analytics, factory network)
//! swallow errors and return a safe default so a backend outage degrades the
//! UI instead of crashing it.

mod admin;
mod chat;
mod factory;
mod partner;

pub use admin::{BuilderRecord, CaseRecord, FactoryRecord, FileRecord, SystemInfo, TrendPoint};
pub use chat::ChatReply;
pub use factory::{CaseSummary, CostEstimate, CostEstimateRequest, CostLineItem, FactoryMatch};
pub use partner::{DealRecord, InquiryForm, PartnerShop, ShopFilter};

use anyhow::Result;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5002";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const BASE_URL_ENV: &str = "VANCARE_BACKEND_URL";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("リクエストがタイムアウトしました")]
    Timeout,
    #[error("ネットワークエラーが発生しました: {0}")]
    Network(String),
    #[error("バックエンドサーバーに接続できません。サーバーの起動状態を確認してください。")]
    Unreachable,
    #[error("サーバーエラー ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Backend(String),
    #[error("応答の解析に失敗しました: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Failures the user can plausibly fix by retrying later, shown with the
    /// localized timeout message instead of a raw error string.
    pub fn is_timeout_or_network(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout | ApiError::Network(_) | ApiError::Unreachable
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configured HTTP client: base URL, JSON content type, 60-second budget on
/// every request.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
}

impl ApiClient {
    /// Base URL comes from `VANCARE_BACKEND_URL`, falling back to the local
    /// development backend.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_checked(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String, ApiError> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        Self::require_success(response).await
    }

    pub(crate) async fn post_checked<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ApiError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::require_success(response).await
    }

    pub(crate) async fn patch_checked<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ApiError> {
        let response = self.http.patch(self.url(path)).json(body).send().await?;
        Self::require_success(response).await
    }

    pub(crate) async fn require_success(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Minimal acknowledgement shape shared by the mutating endpoints.
#[derive(Deserialize)]
pub(crate) struct Ack {
    success: Option<bool>,
    error: Option<String>,
    message: Option<String>,
}

/// An HTTP 2xx body can still report `{"success": false}`; surface the
/// server-provided message when it does.
pub(crate) fn reject_failure(body: &str) -> Result<(), ApiError> {
    if let Ok(ack) = serde_json::from_str::<Ack>(body)
        && ack.success == Some(false)
    {
        let message = ack
            .error
            .or(ack.message)
            .unwrap_or_else(|| "バックエンド処理に失敗しました".to_string());
        return Err(ApiError::Backend(message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5002/").expect("client");
        assert_eq!(client.url("/api/admin/files"), "http://localhost:5002/api/admin/files");
    }

    #[test]
    fn reject_failure_surfaces_server_message() {
        let err = reject_failure(r#"{"success": false, "error": "case not found"}"#)
            .expect_err("should reject");
        assert!(matches!(err, ApiError::Backend(message) if message == "case not found"));
    }

    #[test]
    fn reject_failure_accepts_success_and_unshaped_bodies() {
        assert!(reject_failure(r#"{"success": true}"#).is_ok());
        assert!(reject_failure(r#"{"cases": []}"#).is_ok());
        assert!(reject_failure("not json at all").is_ok());
    }

    #[test]
    fn retry_hints_cover_transport_failures_only() {
        assert!(ApiError::Timeout.is_timeout_or_network());
        assert!(ApiError::Network("reset".into()).is_timeout_or_network());
        assert!(ApiError::Unreachable.is_timeout_or_network());
        assert!(!ApiError::Backend("boom".into()).is_timeout_or_network());
        assert!(
            !ApiError::Status {
                status: 500,
                body: String::new()
            }
            .is_timeout_or_network()
        );
    }
}

//! HTTP client for the ledger/audit service
//!
//! Performs the single POST that ships a [`TrackingRecord`] to the external
//! ledger. Transport and HTTP-status failures propagate to the caller: the
//! tracker is the layer that decides to swallow them, which keeps the two
//! concerns separately testable.

use crate::{
    config::LedgerConfig,
    order::OrderType,
    tracking::{LedgerTransport, TrackingRecord},
    GateError, Result,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Hardcoded local fallback when no base URL is configured
pub const DEFAULT_LEDGER_URL: &str = "http://localhost:3000";

/// Header carrying the service-level API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Header carrying the resolved user identity
pub const USER_ID_HEADER: &str = "X-User-Id";

/// HTTP client for the ledger/audit service
pub struct TradingApiClient {
    http: reqwest::Client,
    config: LedgerConfig,
}

impl TradingApiClient {
    /// Create a client from ledger configuration
    pub fn new(config: LedgerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GateError::Tracking(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Resolve the target base URL: explicit override, then configured
    /// value, then the hardcoded local default.
    fn resolve_base_url(&self, base_url_override: Option<&str>) -> String {
        base_url_override
            .map(str::to_string)
            .or_else(|| self.config.base_url.clone())
            .unwrap_or_else(|| DEFAULT_LEDGER_URL.to_string())
    }

    /// Build the endpoint URL for an order category
    fn endpoint_url(&self, base_url: &str, order_type: OrderType) -> Result<Url> {
        let base = Url::parse(base_url)
            .map_err(|e| GateError::Config(format!("Invalid ledger base URL: {}", e)))?;

        base.join(&format!("/api/trading-orders/{}", order_type.endpoint_slug()))
            .map_err(|e| GateError::Config(format!("Invalid ledger endpoint: {}", e)).into())
    }

    /// Ship one tracking record to the ledger service.
    ///
    /// Authentication: with an API key configured, it goes in the
    /// `X-API-Key` header (plus `X-User-Id` when a user identity is known —
    /// otherwise key-only, and the ledger resolves ownership from the
    /// workflow id). Without an API key a user identity is mandatory and is
    /// embedded in the request body instead; with neither, this fails fast
    /// before any network attempt.
    pub async fn send_order_to_api(
        &self,
        record: &TrackingRecord,
        order_type: OrderType,
        base_url_override: Option<&str>,
    ) -> Result<serde_json::Value> {
        let base_url = self.resolve_base_url(base_url_override);
        let url = self.endpoint_url(&base_url, order_type)?;

        let mut body = serde_json::to_value(record)
            .map_err(|e| GateError::Tracking(format!("Failed to serialize record: {}", e)))?;

        let mut request = self.http.post(url.clone());

        match &self.config.api_key {
            Some(api_key) => {
                request = request.header(API_KEY_HEADER, api_key);
                if let Some(user_id) = &record.user_id {
                    request = request.header(USER_ID_HEADER, user_id);
                }
            }
            None => {
                let user_id = record.user_id.clone().ok_or_else(|| {
                    GateError::Config(
                        "Ledger authentication requires an API key or a resolvable user id"
                            .to_string(),
                    )
                })?;
                body["userId"] = serde_json::Value::String(user_id);
            }
        }

        debug!(url = %url, order_type = %order_type, "Posting tracking record to ledger");

        let response = request.json(&body).send().await?.error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl LedgerTransport for TradingApiClient {
    async fn send_order(
        &self,
        record: TrackingRecord,
        order_type: OrderType,
        base_url_override: Option<String>,
    ) -> Result<serde_json::Value> {
        self.send_order_to_api(&record, order_type, base_url_override.as_deref())
            .await
    }
}

//! Rate table loading: transport, payload validation, and bounded retry.
//!
//! The loader is the only asynchronous piece of the core. It produces either
//! a fully validated [`RateTable`] or a [`FetchFailure`]; malformed payloads
//! never reach the calculator.
//!
//! # Payload
//!
//! ```json
//! { "date": "2024-01-01", "rates": { "usd": 1, "inr": 83.0, "eur": 0.92 } }
//! ```
//!
//! The rate map may also be keyed `usd`, which is how the default feed
//! publishes its dollar-based table.

use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::http_client::{HttpClient, HttpRequest};
use crate::retry::RetryConfig;
use crate::{AsOfDate, RateTable};

pub const DEFAULT_RATES_URL: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/usd.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Why a rate table could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("rate source transport error: {message}")]
    Transport { message: String, retryable: bool },
    #[error("rate source did not answer within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("rate source answered with HTTP status {status}")]
    Status { status: u16 },
    #[error("malformed rate payload: {reason}")]
    MalformedPayload { reason: String },
    #[error("failed to read rate file '{path}': {message}")]
    Io { path: String, message: String },
}

impl FetchFailure {
    fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    /// Whether a retry could plausibly succeed under `config`.
    pub fn retryable(&self, config: &RetryConfig) -> bool {
        match self {
            Self::Transport { retryable, .. } => *retryable,
            Self::Timeout { .. } => config.retry_on_timeout,
            Self::Status { status } => config.should_retry_status(*status),
            Self::MalformedPayload { .. } | Self::Io { .. } => false,
        }
    }
}

/// Where to fetch rates from and how patiently.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSourceConfig {
    pub url: String,
    pub timeout_ms: u64,
    pub retry: RetryConfig,
}

impl Default for RateSourceConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_RATES_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryConfig::default(),
        }
    }
}

impl RateSourceConfig {
    /// Defaults overridden by `FXPAD_RATES_URL`, `FXPAD_RATES_TIMEOUT_MS`
    /// and `FXPAD_RATES_MAX_RETRIES`. Unparseable numbers are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("FXPAD_RATES_URL") {
            if !url.trim().is_empty() {
                config.url = url.trim().to_owned();
            }
        }
        if let Some(timeout_ms) = env_number("FXPAD_RATES_TIMEOUT_MS") {
            config.timeout_ms = timeout_ms;
        }
        if let Some(max_retries) = env_number("FXPAD_RATES_MAX_RETRIES") {
            config.retry.max_retries = max_retries;
        }

        config
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    date: Option<String>,
    rates: Option<Map<String, Value>>,
    usd: Option<Map<String, Value>>,
}

/// Validate a rate payload and turn it into a [`RateTable`].
pub fn parse_rate_payload(body: &str) -> Result<RateTable, FetchFailure> {
    let raw: RawPayload = serde_json::from_str(body)
        .map_err(|error| FetchFailure::malformed(format!("invalid JSON: {error}")))?;

    let date = raw
        .date
        .ok_or_else(|| FetchFailure::malformed("missing 'date'"))?;
    let date = AsOfDate::parse(&date).map_err(|error| FetchFailure::malformed(error.to_string()))?;

    let rates = raw
        .rates
        .or(raw.usd)
        .ok_or_else(|| FetchFailure::malformed("missing 'rates'"))?;

    let mut pairs = Vec::with_capacity(rates.len());
    for (code, value) in rates {
        let rate = value.as_f64().ok_or_else(|| {
            FetchFailure::malformed(format!("rate for '{code}' is not a number: {value}"))
        })?;
        pairs.push((code, rate));
    }

    RateTable::from_pairs(date, pairs).map_err(|error| FetchFailure::malformed(error.to_string()))
}

/// Load a rate table from a JSON file with the same shape as the feed.
pub fn load_rate_file(path: impl AsRef<Path>) -> Result<RateTable, FetchFailure> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path).map_err(|error| FetchFailure::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    })?;
    let table = parse_rate_payload(&body)?;
    info!(path = %path.display(), date = %table.date(), currencies = table.len(), "loaded rate file");
    Ok(table)
}

/// Fetches the USD rate table with a per-attempt timeout and bounded retry.
///
/// Dropping the future returned by [`RateLoader::load`] abandons the fetch.
#[derive(Clone)]
pub struct RateLoader {
    http_client: Arc<dyn HttpClient>,
    config: RateSourceConfig,
}

impl RateLoader {
    pub fn new(http_client: Arc<dyn HttpClient>, config: RateSourceConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &RateSourceConfig {
        &self.config
    }

    pub async fn load(&self) -> Result<RateTable, FetchFailure> {
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            match self.fetch_once().await {
                Ok(table) => {
                    info!(
                        url = %self.config.url,
                        date = %table.date(),
                        currencies = table.len(),
                        attempts = attempt + 1,
                        "loaded rate table"
                    );
                    return Ok(table);
                }
                Err(failure) if attempt < retry.max_retries && failure.retryable(retry) => {
                    let delay = retry.delay_for_attempt(attempt);
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = retry.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %failure,
                        "rate fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(failure) => {
                    warn!(url = %self.config.url, attempts = attempt + 1, error = %failure, "rate fetch failed");
                    return Err(failure);
                }
            }
        }
    }

    async fn fetch_once(&self) -> Result<RateTable, FetchFailure> {
        let timeout_ms = self.config.timeout_ms;
        let request = HttpRequest::get(&self.config.url)
            .with_header("accept", "application/json")
            .with_timeout_ms(timeout_ms);

        debug!(url = %request.url, timeout_ms, "requesting rate table");
        let response = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.http_client.execute(request),
        )
        .await
        .map_err(|_| FetchFailure::Timeout { timeout_ms })?
        .map_err(|error| FetchFailure::Transport {
            message: error.message().to_owned(),
            retryable: error.retryable(),
        })?;

        if !response.is_success() {
            return Err(FetchFailure::Status {
                status: response.status,
            });
        }

        parse_rate_payload(&response.body)
    }
}

impl std::fmt::Debug for RateLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

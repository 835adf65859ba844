//! Behavior-driven tests for the rate table loader.
//!
//! These tests verify HOW the loader handles upstream responses, failures,
//! and slow sources, using a scripted transport instead of the network.

use std::collections::VecDeque;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fxpad_core::{
    load_rate_file, CurrencyCode, FetchFailure, HttpClient, HttpError, HttpRequest, HttpResponse,
    RateLoader, RateSourceConfig, RetryConfig,
};

const VALID_BODY: &str = r#"{"date":"2024-01-01","rates":{"usd":1,"inr":83,"eur":0.92}}"#;

/// Transport that replays a fixed script of outcomes, one per call.
struct ScriptedHttpClient {
    script: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    calls: AtomicUsize,
    delay: Duration,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    fn new(script: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn slow(delay: Duration, script: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            delay,
            ..Self::new(script)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().expect("requests lock").push(request);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.script
                .lock()
                .expect("script lock")
                .pop_front()
                .unwrap_or_else(|| Err(HttpError::non_retryable("script exhausted")))
        })
    }
}

fn fast_config(max_retries: u32) -> RateSourceConfig {
    RateSourceConfig::default()
        .with_url("https://rates.example.test/usd.json")
        .with_timeout_ms(1_000)
        .with_retry(RetryConfig::fixed(Duration::from_millis(1), max_retries))
}

fn loader(client: &Arc<ScriptedHttpClient>, config: RateSourceConfig) -> RateLoader {
    let client: Arc<dyn HttpClient> = client.clone();
    RateLoader::new(client, config)
}

// =============================================================================
// Rate Loader: Valid Responses
// =============================================================================

#[tokio::test]
async fn when_source_answers_with_valid_rates_loader_returns_a_table() {
    // Given: A source that answers immediately with a valid payload
    let client = Arc::new(ScriptedHttpClient::new(vec![Ok(HttpResponse::ok_json(
        VALID_BODY,
    ))]));

    // When: The rates are loaded
    let table = loader(&client, fast_config(3)).load().await.expect("load");

    // Then: The table carries the date and every rate
    assert_eq!(table.date().format_iso(), "2024-01-01");
    assert_eq!(table.len(), 3);
    let inr = CurrencyCode::parse("inr").expect("code");
    assert_eq!(table.rate(&inr), Ok(83.0));
    assert_eq!(client.calls(), 1);

    // And: The request asked for JSON at the configured URL
    let requests = client.requests.lock().expect("requests lock");
    assert_eq!(requests[0].url, "https://rates.example.test/usd.json");
    assert_eq!(
        requests[0].headers.get("accept").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(requests[0].timeout_ms, 1_000);
}

// =============================================================================
// Rate Loader: Retry Behavior
// =============================================================================

#[tokio::test]
async fn when_source_is_briefly_unavailable_loader_retries_and_succeeds() {
    let client = Arc::new(ScriptedHttpClient::new(vec![
        Ok(HttpResponse::with_status(503, "busy")),
        Err(HttpError::new("connection reset")),
        Ok(HttpResponse::ok_json(VALID_BODY)),
    ]));

    let table = loader(&client, fast_config(3)).load().await.expect("load");

    assert_eq!(table.len(), 3);
    assert_eq!(client.calls(), 3);
}

#[tokio::test]
async fn when_source_keeps_failing_loader_gives_up_after_the_bound() {
    let client = Arc::new(ScriptedHttpClient::new(vec![
        Ok(HttpResponse::with_status(502, "")),
        Ok(HttpResponse::with_status(502, "")),
        Ok(HttpResponse::with_status(503, "")),
        Ok(HttpResponse::ok_json(VALID_BODY)),
    ]));

    let failure = loader(&client, fast_config(2)).load().await.expect_err("must fail");

    assert_eq!(failure, FetchFailure::Status { status: 503 });
    assert_eq!(client.calls(), 3, "one attempt plus two retries");
}

#[tokio::test]
async fn when_resource_is_missing_loader_does_not_retry() {
    let client = Arc::new(ScriptedHttpClient::new(vec![
        Ok(HttpResponse::with_status(404, "not found")),
        Ok(HttpResponse::ok_json(VALID_BODY)),
    ]));

    let failure = loader(&client, fast_config(3)).load().await.expect_err("must fail");

    assert_eq!(failure, FetchFailure::Status { status: 404 });
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn when_payload_is_malformed_loader_fails_without_retrying() {
    let client = Arc::new(ScriptedHttpClient::new(vec![
        Ok(HttpResponse::ok_json(r#"{"date":"2024-01-01","rates":{"usd":"one"}}"#)),
        Ok(HttpResponse::ok_json(VALID_BODY)),
    ]));

    let failure = loader(&client, fast_config(3)).load().await.expect_err("must fail");

    assert!(matches!(failure, FetchFailure::MalformedPayload { .. }));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn when_transport_error_is_permanent_loader_does_not_retry() {
    let client = Arc::new(ScriptedHttpClient::new(vec![Err(HttpError::non_retryable(
        "invalid url",
    ))]));

    let failure = loader(&client, fast_config(3)).load().await.expect_err("must fail");

    assert_eq!(
        failure,
        FetchFailure::Transport {
            message: String::from("invalid url"),
            retryable: false
        }
    );
    assert_eq!(client.calls(), 1);
}

// =============================================================================
// Rate Loader: Timeouts
// =============================================================================

#[tokio::test]
async fn when_source_is_too_slow_loader_times_out() {
    let client = Arc::new(ScriptedHttpClient::slow(
        Duration::from_millis(500),
        vec![Ok(HttpResponse::ok_json(VALID_BODY))],
    ));
    let config = fast_config(0).with_timeout_ms(20);

    let failure = loader(&client, config).load().await.expect_err("must time out");

    assert_eq!(failure, FetchFailure::Timeout { timeout_ms: 20 });
}

#[tokio::test]
async fn timed_out_attempts_are_retried() {
    let client = Arc::new(ScriptedHttpClient::slow(
        Duration::from_millis(200),
        vec![
            Ok(HttpResponse::ok_json(VALID_BODY)),
            Ok(HttpResponse::ok_json(VALID_BODY)),
        ],
    ));
    let config = fast_config(1).with_timeout_ms(20);

    let failure = loader(&client, config).load().await.expect_err("must time out");

    assert!(matches!(failure, FetchFailure::Timeout { .. }));
    assert_eq!(client.calls(), 2);
}

// =============================================================================
// Rate File
// =============================================================================

#[test]
fn rates_can_be_loaded_from_a_local_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(br#"{"date":"2024-05-01","usd":{"usd":1,"jpy":155.2}}"#)
        .expect("write rates");

    let table = load_rate_file(file.path()).expect("load file");

    assert_eq!(table.date().format_iso(), "2024-05-01");
    assert_eq!(table.len(), 2);
}

#[test]
fn missing_rate_file_is_a_fetch_failure() {
    let dir = tempfile::tempdir().expect("temp dir");

    let failure = load_rate_file(dir.path().join("absent.json")).expect_err("must fail");

    assert!(matches!(failure, FetchFailure::Io { .. }));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn default_source_is_bounded_and_points_at_the_usd_feed() {
    let config = RateSourceConfig::default();

    assert!(config.url.ends_with("/usd.json"));
    assert_eq!(config.timeout_ms, 3_000);
    assert_eq!(config.retry.max_retries, 3);
}

#[test]
fn environment_overrides_the_rate_source_defaults() {
    // Only this test touches these variables in this binary.
    const URL: &str = "FXPAD_RATES_URL";
    const TIMEOUT: &str = "FXPAD_RATES_TIMEOUT_MS";
    const RETRIES: &str = "FXPAD_RATES_MAX_RETRIES";

    // Given: All three overrides are set
    std::env::set_var(URL, " https://mirror.example.test/usd.json ");
    std::env::set_var(TIMEOUT, "750");
    std::env::set_var(RETRIES, "5");

    // When: The config is read from the environment
    let config = RateSourceConfig::from_env();

    // Then: Every override applies
    assert_eq!(config.url, "https://mirror.example.test/usd.json");
    assert_eq!(config.timeout_ms, 750);
    assert_eq!(config.retry.max_retries, 5);

    // And: Blank or unparseable values fall back to the defaults
    std::env::set_var(URL, "   ");
    std::env::set_var(TIMEOUT, "soon");
    std::env::set_var(RETRIES, "-1");
    let config = RateSourceConfig::from_env();
    let defaults = RateSourceConfig::default();
    assert_eq!(config.url, defaults.url);
    assert_eq!(config.timeout_ms, 3_000);
    assert_eq!(config.retry.max_retries, 3);

    std::env::remove_var(URL);
    std::env::remove_var(TIMEOUT);
    std::env::remove_var(RETRIES);
    assert_eq!(RateSourceConfig::from_env(), defaults);
}

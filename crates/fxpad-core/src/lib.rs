//! # fxpad core
//!
//! Conversion and lookup core of the fxpad currency converter.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Currency codes, rate entries, rate tables |
//! | [`exchange`] | Conversion through USD and money display rounding |
//! | [`rates`] | Rate payload validation and the retrying loader |
//! | [`timezone`] | Timezone → country resolution over a bundled dataset |
//! | [`currency`] | Bundled currency metadata and default-currency guess |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`retry`] | Backoff policy for the rate fetch |
//! | [`error`] | Core error types |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fxpad_core::{CurrencyCode, RateLoader, RateSourceConfig, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = RateLoader::new(Arc::new(ReqwestHttpClient::new()), RateSourceConfig::from_env());
//!     let table = loader.load().await?;
//!
//!     let usd = CurrencyCode::parse("usd")?;
//!     let inr = CurrencyCode::parse("inr")?;
//!     let conversion = table.convert(100.0, &usd, &inr)?;
//!     println!("{} {}", conversion.display, conversion.to);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! - [`FetchFailure`]: the rate table could not be produced; callers degrade
//!   (stay on the loading state) rather than crash.
//! - [`LookupError`]: a code missing from a table that should contain it.
//! - Legitimate negative lookups (unknown timezone, country without a
//!   currency) are `None`.

pub mod currency;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod http_client;
pub mod rates;
pub mod retry;
pub mod timezone;

pub use currency::{guess_default_currency, CurrencyGuess, CurrencyRecord, CurrencyTable};
pub use domain::{AsOfDate, CurrencyCode, RateEntry, RateTable};
pub use error::{CoreError, LookupError, ValidationError};
pub use exchange::{exchange, format_amount, minor_units, round_to_minor_units, Conversion};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use rates::{load_rate_file, parse_rate_payload, FetchFailure, RateLoader, RateSourceConfig};
pub use retry::{Backoff, RetryConfig};
pub use timezone::{
    offset_string, CountryOptions, CountryView, TimezoneDataset, TimezoneEntry, TimezoneRecord,
    TimezoneResolver,
};

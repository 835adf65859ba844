//! CLI argument definitions for fxpad.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `convert` | Convert an amount between two currencies |
//! | `rates` | Show the loaded rate table |
//! | `timezone` | Resolve a timezone record |
//! | `country` | Resolve a country and its timezones |
//! | `guess` | Guess the default currency from a timezone |
//! | `currency` | Show metadata for one currency |
//! | `currencies` | List bundled currency metadata |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--rates-url` | feed URL | Rate source endpoint (`FXPAD_RATES_URL`) |
//! | `--rates-file` | none | Read rates from a local JSON file instead |
//! | `--timeout-ms` | `3000` | Per-attempt fetch timeout (`FXPAD_RATES_TIMEOUT_MS`) |
//! | `--max-retries` | `3` | Fetch retries after the first attempt (`FXPAD_RATES_MAX_RETRIES`) |
//!
//! # Examples
//!
//! ```bash
//! fxpad convert 100 usd inr
//! fxpad convert 2500 jpy eur --rates-file rates.json --pretty
//! fxpad guess --timezone Asia/Kolkata
//! fxpad country FR --deprecated
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Currency converter with live USD rates and timezone-based defaults.
#[derive(Debug, Parser)]
#[command(name = "fxpad", author, version, about = "Currency converter and lookup CLI")]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Rate source endpoint; overrides FXPAD_RATES_URL.
    #[arg(long, global = true)]
    pub rates_url: Option<String>,

    /// Read the rate table from a JSON file instead of the network.
    #[arg(long, global = true, conflicts_with = "rates_url")]
    pub rates_file: Option<PathBuf>,

    /// Per-attempt fetch timeout in milliseconds; overrides FXPAD_RATES_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Retries after the first failed fetch; overrides FXPAD_RATES_MAX_RETRIES.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert an amount from one currency to another.
    ///
    ///   fxpad convert 100 usd inr
    Convert(ConvertArgs),

    /// Show the date and size of the current rate table.
    Rates(RatesArgs),

    /// Resolve an IANA timezone name.
    ///
    ///   fxpad timezone Europe/Paris
    Timezone(TimezoneArgs),

    /// Resolve a country by its two-letter code.
    ///
    ///   fxpad country IN
    Country(CountryArgs),

    /// Guess the default currency for a timezone (defaults to $TZ).
    Guess(GuessArgs),

    /// Show metadata for one currency code.
    Currency(CurrencyArgs),

    /// List all bundled currencies.
    Currencies,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Quantity to convert; finite and non-negative.
    pub amount: f64,
    /// Source currency code (e.g. usd).
    pub from: String,
    /// Target currency code (e.g. inr).
    pub to: String,
}

#[derive(Debug, Args)]
pub struct RatesArgs {
    /// Include every rate entry in the output.
    #[arg(long, default_value_t = false)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct TimezoneArgs {
    /// IANA timezone name, e.g. Asia/Kolkata.
    pub name: String,
}

#[derive(Debug, Args)]
pub struct CountryArgs {
    /// Two-letter country code, e.g. FR.
    pub id: String,

    /// Include deprecated timezone names.
    #[arg(long, default_value_t = false)]
    pub deprecated: bool,
}

#[derive(Debug, Args)]
pub struct GuessArgs {
    /// Timezone to guess from; falls back to the TZ environment variable.
    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Debug, Args)]
pub struct CurrencyArgs {
    /// Currency code, e.g. eur.
    pub code: String,
}

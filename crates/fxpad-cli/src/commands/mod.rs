mod convert;
mod country;
mod currency;
mod guess;
mod rates;
mod timezone;

use std::sync::Arc;

use fxpad_core::{load_rate_file, RateLoader, RateSourceConfig, RateTable, ReqwestHttpClient};
use serde_json::Value;
use tracing::warn;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self { data }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Convert(args) => convert::run(args, &load_rates(cli).await?),
        Command::Rates(args) => rates::run(args, &load_rates(cli).await?),
        Command::Timezone(args) => timezone::run(args),
        Command::Country(args) => country::run(args),
        Command::Guess(args) => guess::run(args),
        Command::Currency(args) => currency::run(args),
        Command::Currencies => currency::list(),
    }
}

/// Environment defaults, then command-line overrides.
fn rate_source_config(cli: &Cli) -> RateSourceConfig {
    let mut config = RateSourceConfig::from_env();
    if let Some(url) = &cli.rates_url {
        config = config.with_url(url.clone());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    if let Some(max_retries) = cli.max_retries {
        config.retry.max_retries = max_retries;
    }
    config
}

async fn load_rates(cli: &Cli) -> Result<RateTable, CliError> {
    let loaded = match &cli.rates_file {
        Some(path) => load_rate_file(path),
        None => {
            let loader = RateLoader::new(Arc::new(ReqwestHttpClient::new()), rate_source_config(cli));
            loader.load().await
        }
    };

    loaded.map_err(|failure| {
        warn!(error = %failure, "no rate table available");
        CliError::from(failure)
    })
}

use std::env;

use fxpad_core::{guess_default_currency, CurrencyTable, TimezoneResolver};

use crate::cli::GuessArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &GuessArgs) -> Result<CommandResult, CliError> {
    let timezone = match &args.timezone {
        Some(timezone) => timezone.trim().to_owned(),
        None => env::var("TZ")
            .ok()
            .map(|tz| tz.trim().trim_start_matches(':').to_owned())
            .filter(|tz| !tz.is_empty())
            .ok_or_else(|| {
                CliError::Command(String::from(
                    "no timezone given; pass --timezone or set TZ",
                ))
            })?,
    };

    let guess = guess_default_currency(
        TimezoneResolver::bundled(),
        CurrencyTable::bundled(),
        &timezone,
    )
    .ok_or_else(|| CliError::NotFound {
        what: "country for timezone",
        value: timezone.clone(),
    })?;
    Ok(CommandResult::ok(serde_json::to_value(guess)?))
}

use fxpad_core::{CountryOptions, TimezoneResolver};

use crate::cli::CountryArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &CountryArgs) -> Result<CommandResult, CliError> {
    let options = CountryOptions {
        include_deprecated: args.deprecated,
    };
    let id = args.id.trim().to_ascii_uppercase();

    let country = TimezoneResolver::bundled()
        .country(&id, options)
        .ok_or_else(|| CliError::NotFound {
            what: "country",
            value: args.id.clone(),
        })?;
    Ok(CommandResult::ok(serde_json::to_value(country)?))
}

use fxpad_core::TimezoneResolver;

use crate::cli::TimezoneArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &TimezoneArgs) -> Result<CommandResult, CliError> {
    let record = TimezoneResolver::bundled()
        .timezone(args.name.trim())
        .ok_or_else(|| CliError::NotFound {
            what: "timezone",
            value: args.name.clone(),
        })?;
    Ok(CommandResult::ok(serde_json::to_value(record)?))
}

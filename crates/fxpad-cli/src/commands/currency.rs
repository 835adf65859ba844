use fxpad_core::CurrencyTable;

use crate::cli::CurrencyArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &CurrencyArgs) -> Result<CommandResult, CliError> {
    let record = CurrencyTable::bundled()
        .find(&args.code)
        .ok_or_else(|| CliError::NotFound {
            what: "currency",
            value: args.code.clone(),
        })?;
    Ok(CommandResult::ok(serde_json::to_value(record)?))
}

pub fn list() -> Result<CommandResult, CliError> {
    let records = CurrencyTable::bundled().iter().collect::<Vec<_>>();
    Ok(CommandResult::ok(serde_json::to_value(records)?))
}

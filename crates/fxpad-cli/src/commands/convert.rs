use fxpad_core::{CurrencyCode, RateTable};

use crate::cli::ConvertArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &ConvertArgs, table: &RateTable) -> Result<CommandResult, CliError> {
    let from = CurrencyCode::parse(&args.from)?;
    let to = CurrencyCode::parse(&args.to)?;

    let conversion = table.convert(args.amount, &from, &to)?;
    Ok(CommandResult::ok(serde_json::to_value(conversion)?))
}

use fxpad_core::{RateEntry, RateTable};
use serde::Serialize;

use crate::cli::RatesArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct RatesResponseData<'a> {
    date: String,
    as_of: String,
    currencies: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    rates: Option<Vec<&'a RateEntry>>,
}

pub fn run(args: &RatesArgs, table: &RateTable) -> Result<CommandResult, CliError> {
    let data = RatesResponseData {
        date: table.date().format_iso(),
        as_of: table.date().format_long(),
        currencies: table.len(),
        rates: args.all.then(|| table.entries().collect()),
    };
    Ok(CommandResult::ok(serde_json::to_value(data)?))
}

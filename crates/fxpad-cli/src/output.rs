use std::io::{self, Write};

use serde_json::Value;

use crate::commands::CommandResult;
use crate::error::CliError;

pub fn render(result: &CommandResult, pretty: bool) -> Result<(), CliError> {
    let payload = render_to_string(&result.data, pretty)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{payload}")?;
    Ok(())
}

fn render_to_string(data: &Value, pretty: bool) -> Result<String, CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(data)?
    } else {
        serde_json::to_string(data)?
    };
    Ok(payload)
}

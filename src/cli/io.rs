//! JSON I/O handling for CLI
//!
//! - Input: a single JSON descriptor line via stdin
//! - Output: a single JSON object via stdout
//! - Logs never share stdout

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use crate::query::RawDescriptor;

use super::errors::{CliError, CliResult};

/// Read a wire descriptor from one line of input.
///
/// An empty line is an unrestricted descriptor.
pub fn read_descriptor<R: BufRead>(reader: &mut R) -> CliResult<RawDescriptor> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.trim().is_empty() {
        return Ok(RawDescriptor::default());
    }

    serde_json::from_str(&line)
        .map_err(|e| CliError::io_error(format!("Invalid descriptor JSON: {}", e)))
}

/// Read a wire descriptor from stdin
pub fn read_request() -> CliResult<RawDescriptor> {
    read_descriptor(&mut io::stdin().lock())
}

/// Build a success response
pub fn ok_response(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Build an error response
pub fn error_response(err: &CliError) -> Value {
    let mut response = json!({
        "status": "error",
        "code": err.code_str(),
        "message": err.message()
    });
    if let Some(field) = err.field() {
        response["field"] = json!(field);
    }
    response
}

fn write_line(response: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&ok_response(data))
}

/// Write an error response to stdout
pub fn write_error(err: &CliError) -> CliResult<()> {
    write_line(&error_response(err))
}

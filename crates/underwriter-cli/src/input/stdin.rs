use std::io::{self, Read};

use underwriter_core::normalize::RawRecord;

use super::file::rows_from_value;

/// Read rows piped on stdin as JSON (a single row, an array of rows, or a
/// `{"records": [...]}` object).
/// Returns None if stdin is a TTY (interactive) or nothing was piped.
pub fn read_stdin_rows() -> Result<Option<Vec<RawRecord>>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse JSON from stdin: {}", e))?;
    let rows = rows_from_value(value).map_err(|e| format!("stdin: {}", e))?;
    Ok(Some(rows))
}

use findash_core::SourceTable;
use std::io::{self, Read};

/// Attempt to read the CSV table from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin() -> Result<Option<SourceTable>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let table = SourceTable::from_csv_reader(trimmed.as_bytes())?;
    Ok(Some(table))
}

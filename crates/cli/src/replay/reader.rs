//! Flush event file decoding (JSON lines).

use contracts::TableBatch;

use crate::error::{CliError, Result};

/// One flush event: the table batches the host delivers in a single call
pub type FlushEvent = Vec<TableBatch>;

/// Decode one flush event per non-blank line
///
/// # Errors
/// `CliError::InputParse` naming the 1-based line of the first bad event.
pub fn parse_events(content: &str) -> Result<Vec<FlushEvent>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<FlushEvent>(line)
                .map_err(|e| CliError::input_parse(idx + 1, e.to_string()))
        })
        .collect()
}

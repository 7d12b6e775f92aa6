use thiserror::Error;

use super::types::CheckRequest;

/// Malformed input aborts the whole batch before any query is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid input {0:?}")]
    Empty(String),
}

/// Split one input line into `<host> [<expected-label>]`.
///
/// Fields past the second are ignored. A line with no fields (empty or
/// whitespace-only) is an error.
pub fn parse_line(line: &str) -> Result<CheckRequest, InputError> {
    let mut fields = line.split_whitespace();
    let host = fields
        .next()
        .ok_or_else(|| InputError::Empty(line.to_string()))?;
    let expected_label = fields.next().map(str::to_string);
    Ok(CheckRequest {
        host: host.to_string(),
        expected_label,
    })
}

/// Parse a whole input, one request per line. The first bad line fails the
/// batch; nothing parsed before it is returned.
pub fn parse_input(input: &str) -> Result<Vec<CheckRequest>, InputError> {
    input.lines().map(parse_line).collect()
}

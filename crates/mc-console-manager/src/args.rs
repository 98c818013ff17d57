//! Argument checks run before any command is sent.

use mc_console_core::{ConsoleError, Result};

/// A player name: trimmed, non-empty, a single word.
pub(crate) fn player_name(name: &str) -> Result<&str> {
    single_word("player", name)
}

/// Trimmed text that must not be empty.
pub(crate) fn non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConsoleError::validation(field, "must not be empty"));
    }
    Ok(value)
}

/// Trimmed text that must be exactly one word, so it cannot smuggle extra
/// arguments into the command line.
pub(crate) fn single_word<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = non_empty(field, value)?;
    if value.contains(char::is_whitespace) {
        return Err(ConsoleError::validation(field, "must not contain whitespace"));
    }
    Ok(value)
}

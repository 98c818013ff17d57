//! Decoders for the free-text responses of well-known console commands.
//!
//! Every decoder is a pure function over the raw response text. Input outside
//! a decoder's contract yields [`crate::ConsoleError::Protocol`] carrying the
//! raw text, never a partially filled value.

pub mod difficulty;
pub mod roster;
pub mod time;
pub mod whitelist;

pub use difficulty::*;
pub use roster::*;
pub use time::*;
pub use whitelist::*;

use crate::{ConsoleError, Result};

/// Splits the `": a, b, c"` tail that follows a roster header.
///
/// Returns no names when the declared count is zero or there is no
/// colon-delimited tail. Otherwise every comma-separated element is trimmed
/// and kept, without cross-checking against the declared count.
pub(crate) fn names_after_header(count: u32, tail: &str) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }

    let Some((_, names)) = tail.split_once(':') else {
        return Vec::new();
    };

    let names = names.trim();
    if names.is_empty() {
        return Vec::new();
    }

    names.split(',').map(|name| name.trim().to_string()).collect()
}

/// Parses a count captured from a header.
pub(crate) fn parse_count(decoder: &'static str, digits: &str, raw: &str) -> Result<u32> {
    digits
        .parse()
        .map_err(|e| ConsoleError::protocol(decoder, format!("invalid count {:?}: {}", digits, e), raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_after_header() {
        assert_eq!(names_after_header(2, ": Steve,  Alex "), vec!["Steve", "Alex"]);
        assert!(names_after_header(0, ": Steve").is_empty());
        assert!(names_after_header(3, "").is_empty());
        assert!(names_after_header(3, ":   ").is_empty());
    }

    #[test]
    fn test_parse_count_rejects_overflow() {
        assert_eq!(parse_count("test", "20", "raw").unwrap(), 20);
        assert!(parse_count("test", "99999999999", "raw").is_err());
    }
}

use crate::{ConsoleError, Result};
use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

const DECODER: &str = "difficulty";
const DIFFICULTY_PREFIX: &str = "The difficulty is ";

/// Difficulty levels a server accepts in `difficulty <level>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[display("peaceful")]
    Peaceful,
    #[display("easy")]
    Easy,
    #[display("normal")]
    Normal,
    #[display("hard")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Peaceful,
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
    ];
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.to_string() == wanted)
            .ok_or_else(|| format!("unsupported difficulty {:?}", s))
    }
}

/// Decodes `The difficulty is {Level}` into the lower-cased level name.
///
/// The level is not checked against [`Difficulty`]; modded servers may
/// report levels of their own.
pub fn decode_difficulty(raw: &str) -> Result<String> {
    let level = raw
        .trim_end_matches(['\r', '\n'])
        .strip_prefix(DIFFICULTY_PREFIX)
        .map(str::trim)
        .ok_or_else(|| ConsoleError::protocol(DECODER, "expected `The difficulty is <level>`", raw))?;

    if level.is_empty() {
        return Err(ConsoleError::protocol(DECODER, "difficulty level is missing", raw));
    }

    Ok(level.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_difficulty() {
        assert_eq!(decode_difficulty("The difficulty is Hard\n").unwrap(), "hard");
        assert_eq!(decode_difficulty("The difficulty is Peaceful").unwrap(), "peaceful");
        assert_eq!(decode_difficulty("The difficulty is Nightmare\r\n").unwrap(), "nightmare");
    }

    #[test]
    fn test_decode_difficulty_rejects_other_text() {
        assert!(matches!(
            decode_difficulty("The difficulty is \n"),
            Err(ConsoleError::Protocol { .. })
        ));
        assert!(matches!(
            decode_difficulty("The difficulty has been set to Easy"),
            Err(ConsoleError::Protocol { .. })
        ));
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("nightmare".parse::<Difficulty>().is_err());
        assert!("".parse::<Difficulty>().is_err());
    }
}

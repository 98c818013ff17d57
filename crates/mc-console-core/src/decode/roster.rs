use super::{names_after_header, parse_count};
use crate::{ConsoleError, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

const DECODER: &str = "player list";

static LIST_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^There are (\d+) of a max of (\d+) players online").expect("valid list header pattern")
});

/// Who is online, as reported by `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresenceInfo {
    /// Player names in the order the server listed them
    pub player_names: Vec<String>,
    pub online_count: u32,
    pub max_count: u32,
}

/// Decodes `There are {online} of a max of {max} players online[: a, b, ...]`.
///
/// The number of names is not checked against `online_count`; a server that
/// reports three players but lists two yields two names.
pub fn decode_player_list(raw: &str) -> Result<PresenceInfo> {
    let text = raw.trim();
    let captures = LIST_HEADER.captures(text).ok_or_else(|| {
        ConsoleError::protocol(
            DECODER,
            "expected `There are N of a max of M players online`",
            raw,
        )
    })?;

    let online_count = parse_count(DECODER, &captures[1], raw)?;
    let max_count = parse_count(DECODER, &captures[2], raw)?;
    let header_end = captures.get(0).map_or(0, |m| m.end());

    let player_names = names_after_header(online_count, &text[header_end..]);
    if !player_names.is_empty() && player_names.len() != online_count as usize {
        debug!(
            online_count,
            listed = player_names.len(),
            "Player count differs from the names listed"
        );
    }

    Ok(PresenceInfo {
        player_names,
        online_count,
        max_count,
    })
}

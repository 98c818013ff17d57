use super::{names_after_header, parse_count};
use crate::{ConsoleError, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

const LIST_DECODER: &str = "whitelist list";
const CHANGE_DECODER: &str = "whitelist change";

static WHITELIST_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^There are (\d+|no) whitelisted player(?:s|\(s\))?").expect("valid whitelist header pattern")
});

static ADDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Added (\S+) to the whitelist").expect("valid whitelist add pattern")
});

static REMOVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Removed (\S+) from the whitelist").expect("valid whitelist remove pattern")
});

/// Names on the whitelist, as reported by `whitelist list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WhitelistRoster {
    pub count: u32,
    pub player_names: Vec<String>,
}

impl WhitelistRoster {
    /// Whether `name` is on the list; player names are case-insensitive.
    pub fn contains(&self, name: &str) -> bool {
        self.player_names
            .iter()
            .any(|listed| listed.eq_ignore_ascii_case(name))
    }
}

/// Outcome of `whitelist add` / `whitelist remove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "player", rename_all = "snake_case")]
pub enum WhitelistChange {
    Added(String),
    Removed(String),
    AlreadyWhitelisted,
    NotWhitelisted,
    UnknownPlayer,
}

/// Decodes `There are {n} whitelisted player(s)[: a, b, ...]`.
///
/// `There are no whitelisted players` decodes to an empty roster.
pub fn decode_whitelist(raw: &str) -> Result<WhitelistRoster> {
    let text = raw.trim();
    let captures = WHITELIST_HEADER.captures(text).ok_or_else(|| {
        ConsoleError::protocol(
            LIST_DECODER,
            "expected `There are N whitelisted player(s)`",
            raw,
        )
    })?;

    let count = match &captures[1] {
        "no" => 0,
        digits => parse_count(LIST_DECODER, digits, raw)?,
    };
    let header_end = captures.get(0).map_or(0, |m| m.end());

    let player_names = names_after_header(count, &text[header_end..]);
    if !player_names.is_empty() && player_names.len() != count as usize {
        debug!(
            count,
            listed = player_names.len(),
            "Whitelist count differs from the names listed"
        );
    }

    Ok(WhitelistRoster {
        count,
        player_names,
    })
}

/// Decodes the acknowledgement of a whitelist add or remove.
pub fn decode_whitelist_change(raw: &str) -> Result<WhitelistChange> {
    let text = raw.trim();

    if let Some(captures) = ADDED.captures(text) {
        return Ok(WhitelistChange::Added(captures[1].to_string()));
    }
    if let Some(captures) = REMOVED.captures(text) {
        return Ok(WhitelistChange::Removed(captures[1].to_string()));
    }

    match text {
        "Player is already whitelisted" => Ok(WhitelistChange::AlreadyWhitelisted),
        "Player is not whitelisted" => Ok(WhitelistChange::NotWhitelisted),
        "That player does not exist" => Ok(WhitelistChange::UnknownPlayer),
        _ => Err(ConsoleError::protocol(
            CHANGE_DECODER,
            "not a whitelist acknowledgement",
            raw,
        )),
    }
}

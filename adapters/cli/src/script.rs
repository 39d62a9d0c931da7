//! Parsing of scripted move sequences.
//!
//! Ticks are separated by `;`, moves within a tick by `,`. Each move is a
//! player index followed by a compass letter, for example `0w` or `1n`.

use thiserror::Error;
use tunneler_core::{Direction, PlayerId};

const TICK_DELIMITER: char = ';';
const MOVE_DELIMITER: char = ',';

/// Moves requested during a single tick.
pub(crate) type TickMoves = Vec<(PlayerId, Direction)>;

/// Errors raised while parsing a move script.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The move is missing its player index.
    #[error("move '{0}' does not start with a player index")]
    MissingPlayer(String),
    /// The move does not end with a compass letter.
    #[error("move '{0}' does not end with one of n, e, s, w")]
    InvalidDirection(String),
}

/// Parses a full script into per-tick move lists.
///
/// Empty ticks are kept so scripts can wait a tick with `;;`.
pub(crate) fn parse(script: &str) -> Result<Vec<TickMoves>, ScriptError> {
    let script = script.trim();
    if script.is_empty() {
        return Ok(Vec::new());
    }

    script
        .split(TICK_DELIMITER)
        .map(|tick| {
            tick.split(MOVE_DELIMITER)
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(parse_move)
                .collect()
        })
        .collect()
}

fn parse_move(token: &str) -> Result<(PlayerId, Direction), ScriptError> {
    let mut chars = token.chars();
    let letter = chars
        .next_back()
        .ok_or_else(|| ScriptError::InvalidDirection(token.to_owned()))?;
    let direction = Direction::from_letter(letter)
        .ok_or_else(|| ScriptError::InvalidDirection(token.to_owned()))?;
    let index: u32 = chars
        .as_str()
        .parse()
        .map_err(|_| ScriptError::MissingPlayer(token.to_owned()))?;
    Ok((PlayerId::new(index), direction))
}

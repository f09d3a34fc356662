//! Error type for configuration and boundary validation.
//!
//! All variants are synchronous programming or configuration errors surfaced
//! to the immediate caller; nothing is retried internally, and a failed
//! operation leaves unrelated cached state intact.

use crate::constants::{MAX_DICE, MAX_TILE};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A claimable, pinchable or own tile value exceeds [`MAX_TILE`].
    #[error("invalid tile value {0} (maximum is {MAX_TILE})")]
    InvalidTileValue(usize),

    /// A throw was requested with more dice than [`MAX_DICE`].
    #[error("throw of {0} dice exceeds the maximum of {MAX_DICE}")]
    DiceCountExceeded(usize),

    /// A prospective throw could push the accumulated score past the
    /// maximum representable score.
    #[error("score {score} with {num_dice} more dice could overflow the maximum score")]
    ScoreOverflow { score: usize, num_dice: usize },

    /// A caller tried to take a face that is not present in the current
    /// throw, or that has already been claimed this turn.
    #[error("face {0} is not available in the current throw")]
    FaceUnavailable(usize),

    /// A dice or mask string contains a character outside 'W', '0'..'5'.
    #[error("invalid die symbol {0:?}")]
    InvalidDieSymbol(char),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Board state and the derived payout table.
//!
//! The board is everything the solver needs to know about the table:
//!
//! - `tiles`: central tiles still available, claimable by stopping with a
//!   score at or above their value (you take the best one you qualify for);
//! - `others`: the topmost tile of each opponent, pinchable only by stopping
//!   with a score exactly equal to its value;
//! - `own`: your own top tile, which you lose on a bust.
//!
//! From these three inputs the constructor derives `payouts[score]`, the value
//! obtained by stopping at each score while holding a worm, plus the bust
//! `penalty` (minus the worth of your own tile). Derivation order matters:
//! claimable tiles are written ascending so the highest qualifying tile wins,
//! and pinchable tiles are written afterwards so an exact pinch takes priority
//! at its score.

use std::path::Path;

use serde::Deserialize;

use crate::constants::{MAX_SCORE, MAX_TILE, TILE_VALUES};
use crate::dice;
use crate::error::{Error, Result};

/// On-disk board description (`board.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardConfig {
    /// Central tiles available to claim.
    #[serde(default)]
    pub tiles: Vec<usize>,
    /// Opponents' top tiles, pinchable on an exact score match.
    #[serde(default)]
    pub others: Vec<usize>,
    /// Your own top tile, at risk on a bust.
    #[serde(default)]
    pub own: Option<usize>,
}

/// The table state with its derived payout table.
#[derive(Debug, Clone)]
pub struct Board {
    tiles: Vec<usize>,
    others: Vec<usize>,
    own: Option<usize>,
    /// Value of busting: minus the worth of the own tile, 0 without one.
    pub penalty: i32,
    payouts: [i32; MAX_SCORE + 1],
}

impl Board {
    /// Build a board and derive its payout table. Fails with
    /// [`Error::InvalidTileValue`] if any tile value exceeds [`MAX_TILE`].
    pub fn new(tiles: Vec<usize>, others: Vec<usize>, own: Option<usize>) -> Result<Self> {
        let mut board = Self {
            tiles,
            others,
            own,
            penalty: 0,
            payouts: [0; MAX_SCORE + 1],
        };
        board.tiles.sort_unstable();
        board.others.sort_unstable();
        board.update_payouts()?;
        Ok(board)
    }

    /// Build a board from a parsed configuration.
    pub fn from_config(config: BoardConfig) -> Result<Self> {
        Self::new(config.tiles, config.others, config.own)
    }

    /// Load a board from a JSON description file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: BoardConfig = serde_json::from_str(&text)?;
        Self::from_config(config)
    }

    /// Tiles available to be claimed, ascending.
    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    /// Opponents' pinchable top tiles, ascending.
    pub fn others(&self) -> &[usize] {
        &self.others
    }

    /// Your own at-risk tile, if any.
    pub fn own(&self) -> Option<usize> {
        self.own
    }

    /// Replace the claimable tiles and re-derive the payout table.
    pub fn set_tiles(&mut self, tiles: Vec<usize>) -> Result<()> {
        self.tiles = tiles;
        self.tiles.sort_unstable();
        self.update_payouts()
    }

    /// Replace the pinchable tiles and re-derive the payout table.
    pub fn set_others(&mut self, others: Vec<usize>) -> Result<()> {
        self.others = others;
        self.others.sort_unstable();
        self.update_payouts()
    }

    /// Replace the own tile and re-derive the payout table.
    pub fn set_own(&mut self, own: Option<usize>) -> Result<()> {
        self.own = own;
        self.update_payouts()
    }

    /// The value obtained by stopping at each score while holding a worm.
    pub fn payouts(&self) -> &[i32; MAX_SCORE + 1] {
        &self.payouts
    }

    /// What stopping with this score and claim mask wins. Without a worm no
    /// score can be banked and the result is always the penalty.
    pub fn evaluate(&self, score: usize, used: u8) -> i32 {
        debug_assert!(score <= MAX_SCORE, "score {} out of range", score);
        if dice::contains_worm(used) {
            self.payouts[score]
        } else {
            self.penalty
        }
    }

    fn update_payouts(&mut self) -> Result<()> {
        self.penalty = 0;
        if let Some(own) = self.own {
            if own > MAX_TILE {
                return Err(Error::InvalidTileValue(own));
            }
            self.penalty = -TILE_VALUES[own];
        }
        self.payouts = [self.penalty; MAX_SCORE + 1];
        // Ascending, so a later (higher) tile overwrites every score that
        // also qualifies for it.
        for &tile in &self.tiles {
            if tile > MAX_TILE {
                return Err(Error::InvalidTileValue(tile));
            }
            for slot in &mut self.payouts[tile..] {
                *slot = TILE_VALUES[tile];
            }
        }
        // Exact matches only, applied after the claimable tiles so a pinch
        // takes priority at its score.
        for &tile in &self.others {
            if tile > MAX_TILE {
                return Err(Error::InvalidTileValue(tile));
            }
            self.payouts[tile] = TILE_VALUES[tile];
        }
        Ok(())
    }
}

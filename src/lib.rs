//! # Pickomino — expected-value solver for the push-your-luck dice game
//!
//! In Pickomino you repeatedly throw a shrinking pool of up to 8 dice. After
//! each throw you must set aside every die showing one face you have not
//! claimed yet; then you either stop and bank your score against the tiles on
//! the table, or throw the rest again. A throw offering no fresh face busts
//! the whole turn, and no score banks at all without at least one worm among
//! your claimed faces.
//!
//! This crate computes, for every reachable turn state, the exact expected
//! value of each available choice, and recommends moves under three policies.
//!
//! ## How it works
//!
//! | Step | Module | Description |
//! |------|--------|-------------|
//! | 1 | [`throw`] | Enumerate every distinct throw of N dice (C(N+5,5) histograms) with exact multinomial probabilities, precomputed for N = 0..=8 |
//! | 2 | [`board`] | Derive a score → payout table from the tiles on the table, opponents' pinchable tiles and your own at-risk tile |
//! | 3 | [`strategy`] | Fold policy decisions over all throws into a memoized expectation, recursing as the dice pool shrinks |
//!
//! ## State representation
//!
//! An analysis state is (score, claim mask, remaining dice): score 0..=40,
//! a 6-bit mask of claimed faces, and 0..=8 dice. The memoization cache is a
//! dense flat array of 41 × 64 × 9 = 23,616 slots indexed by
//! [`constants::cache_index`] — small enough to keep fully resident, with no
//! hashing on the recursion path.
//!
//! Everything is single-threaded and synchronous: one [`strategy::Strategy`]
//! owns one cache, recursion depth is bounded by the dice count, and results
//! are pure functions of (board, state).
//!
//! ## Quick start
//!
//! ```no_run
//! use pickomino::{Board, Policy, Strategy, Turn};
//!
//! let board = Board::load("board.json")?;
//! let mut advisor = Turn::new(board, Strategy::new(Policy::Optimal));
//! let rec = advisor.roll_str("WW4441")?;
//! println!("{:?} {:?}", rec.action, rec.face);
//! advisor.take_char('4')?;
//! # Ok::<(), pickomino::Error>(())
//! ```

pub mod board;
pub mod constants;
pub mod dice;
pub mod error;
pub mod simulation;
pub mod strategy;
pub mod throw;
pub mod turn;

pub use board::{Board, BoardConfig};
pub use error::Error;
pub use strategy::{Action, Policy, Strategy};
pub use throw::{Throw, ThrowCatalog};
pub use turn::{Recommendation, Turn};

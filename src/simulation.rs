//! Monte Carlo simulation: play whole turns with a policy and seeded dice.
//!
//! The expectation engine already gives exact EVs; the simulator exists to
//! measure realized-outcome distributions (spread, worst case) and to
//! cross-check that sampled means converge to `analyse`'s exact value.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::constants::{FACE_COUNT, FACE_SCORE, MAX_DICE};
use crate::dice;
use crate::strategy::{Action, Strategy};
use crate::throw::Throw;

/// Aggregate results of a batch of simulated turns.
#[derive(Debug)]
pub struct SimulationResult {
    pub turns: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: i32,
    pub max: i32,
}

/// Roll `num_dice` random dice into a throw.
fn roll(rng: &mut SmallRng, num_dice: usize) -> Throw {
    let faces: Vec<usize> = (0..num_dice)
        .map(|_| rng.random_range(0..FACE_COUNT))
        .collect();
    Throw::from_faces(&faces).expect("at most MAX_DICE dice are rolled")
}

/// Play one full turn with the given strategy and return the realized payout.
pub fn simulate_turn(strategy: &mut Strategy, board: &Board, rng: &mut SmallRng) -> i32 {
    let mut num_dice = MAX_DICE;
    let mut score = 0usize;
    let mut used = 0u8;
    loop {
        let throw = roll(rng, num_dice);
        let (action, face) = strategy.select(&throw, board, score, used);
        let Some(face) = face else {
            // Dead end or give-up: the turn busts.
            return board.penalty;
        };
        let count = throw.histogram[face] as usize;
        score += count * FACE_SCORE[face];
        used = dice::use_face(used, face);
        num_dice -= count;
        if action != Action::Continue || num_dice == 0 {
            return board.evaluate(score, used);
        }
    }
}

/// Play `turns` seeded turns and aggregate the payout distribution.
pub fn simulate_many(
    strategy: &mut Strategy,
    board: &Board,
    turns: usize,
    seed: u64,
) -> SimulationResult {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut payouts = Vec::with_capacity(turns);
    for _ in 0..turns {
        payouts.push(simulate_turn(strategy, board, &mut rng));
    }

    let mean = payouts.iter().map(|&p| p as f64).sum::<f64>() / turns.max(1) as f64;
    let variance = payouts
        .iter()
        .map(|&p| (p as f64 - mean).powi(2))
        .sum::<f64>()
        / turns.max(1) as f64;
    SimulationResult {
        turns,
        mean,
        std_dev: variance.sqrt(),
        min: payouts.iter().copied().min().unwrap_or(0),
        max: payouts.iter().copied().max().unwrap_or(0),
    }
}

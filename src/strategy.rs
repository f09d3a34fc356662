//! The expectation engine and the three decision policies.
//!
//! ## Recursion
//!
//! `analyse(board, num_dice, score, used)` is the expected payout of throwing
//! `num_dice` dice in the given state and then playing on according to the
//! active policy. It enumerates every distinct throw of that many dice, asks
//! the policy what to do with each, and folds the probability-weighted
//! outcomes:
//!
//! - a dead-end throw contributes the bust penalty;
//! - stopping (or running out of dice) contributes `board.evaluate` at the
//!   successor state;
//! - continuing recurses with the remaining dice.
//!
//! Every continue claims at least one die, so `num_dice` strictly decreases
//! and the recursion is bounded by the dice count. Results are memoized in a
//! dense 41 × 64 × 9 array of `Option<f64>` (about 23.6K slots, kept fully
//! resident; no hashing). Expectations can be any real number including
//! negative, so presence is the `Option`, never a sentinel value.
//!
//! ## Policies
//!
//! The original design expressed the policies as an inheritance hierarchy
//! over a shared recursive evaluator; here they are a closed [`Policy`] enum
//! dispatched inside one engine, each a stateless rule:
//!
//! - **Optimal** compares stop and continue expectations for every available
//!   face and keeps the best, recommending give-up when nothing beats the
//!   bust penalty;
//! - **Heuristic** is greedy with no lookahead: best immediate payout if one
//!   is positive (stopping under 3 remaining dice), otherwise grab the first
//!   face in priority order and roll on;
//! - **RiskAverse** stops on the best immediately positive payout and
//!   otherwise defers to the Optimal rule.
//!
//! The cache belongs to one engine instance and is only valid for one board;
//! call [`Strategy::clear_cache`] when the board changes.

use crate::board::Board;
use crate::constants::{cache_index, FACE_SCORE, MAX_DICE, MAX_SCORE, NUM_CACHE_ENTRIES};
use crate::dice;
use crate::throw::{Throw, ThrowCatalog, DEFAULT_ORDER};

/// Comparison tolerance: a candidate must beat the running best by more than
/// this to replace it, so ties keep the earliest face in priority order.
pub const EPSILON: f64 = 1e-6;

/// What to do with the current throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Accept the bust penalty; no choice is worth playing.
    GiveUp,
    /// Take a face and bank the score.
    Stop,
    /// Take a face and roll the remaining dice.
    Continue,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::GiveUp => "give up",
            Action::Stop => "stop",
            Action::Continue => "roll again",
        }
    }
}

/// The closed set of decision rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Policy {
    #[default]
    Optimal,
    Heuristic,
    RiskAverse,
}

/// One policy bound to a throw catalog and a memoization cache.
pub struct Strategy {
    policy: Policy,
    catalog: ThrowCatalog,
    cache: Vec<Option<f64>>,
}

impl Strategy {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            catalog: ThrowCatalog::new(),
            cache: vec![None; NUM_CACHE_ENTRIES],
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Forget all memoized expectations. Required whenever the board this
    /// engine is used with changes, since every cached value depends on the
    /// board's payout table.
    pub fn clear_cache(&mut self) {
        self.cache.fill(None);
    }

    /// Recommend an action and face for a concrete throw. A dead-end throw
    /// short-circuits to `(Stop, None)`: there is nothing to select and the
    /// bust resolves through [`Board::evaluate`]. Give-up recommendations
    /// carry no face either.
    pub fn select(
        &mut self,
        throw: &Throw,
        board: &Board,
        score: usize,
        used: u8,
    ) -> (Action, Option<usize>) {
        self.select_inner(throw, board, score, used, None)
    }

    /// Like [`Strategy::select`], collecting a human-readable line per
    /// considered face into `trace`.
    pub fn select_traced(
        &mut self,
        throw: &Throw,
        board: &Board,
        score: usize,
        used: u8,
        trace: &mut Vec<String>,
    ) -> (Action, Option<usize>) {
        self.select_inner(throw, board, score, used, Some(trace))
    }

    fn select_inner(
        &mut self,
        throw: &Throw,
        board: &Board,
        score: usize,
        used: u8,
        mut trace: Option<&mut Vec<String>>,
    ) -> (Action, Option<usize>) {
        if throw.is_dead_end(used) {
            if let Some(trace) = trace.as_deref_mut() {
                trace.push("no dice available".to_string());
            }
            return (Action::Stop, None);
        }
        let Self {
            policy,
            catalog,
            cache,
        } = self;
        let (action, face) = decide(*policy, catalog, cache, throw, board, score, used, trace);
        match action {
            Action::GiveUp => (Action::GiveUp, None),
            _ => (action, Some(face)),
        }
    }

    /// Expected payout of throwing `num_dice` dice from this state and
    /// playing on with this engine's policy. Negative values are a net
    /// expected loss. Memoized per (score, used, num_dice).
    pub fn analyse(&mut self, board: &Board, num_dice: usize, score: usize, used: u8) -> f64 {
        debug_assert!(num_dice <= MAX_DICE, "num_dice {} out of range", num_dice);
        debug_assert!(
            score + num_dice * 5 <= MAX_SCORE,
            "score {} unreachable with {} dice",
            score,
            num_dice
        );
        let Self {
            policy,
            catalog,
            cache,
        } = self;
        analyse(*policy, catalog, cache, board, num_dice, score, used)
    }

    #[cfg(test)]
    fn cached_entries(&self) -> usize {
        self.cache.iter().filter(|e| e.is_some()).count()
    }
}

/// Memoized expectation recursion. Free-standing so the policy rules can
/// recurse while the cache is mutably borrowed.
fn analyse(
    policy: Policy,
    catalog: &ThrowCatalog,
    cache: &mut [Option<f64>],
    board: &Board,
    num_dice: usize,
    score: usize,
    used: u8,
) -> f64 {
    let slot = cache_index(score, used, num_dice);
    if let Some(value) = cache[slot] {
        return value;
    }

    let penalty = board.penalty as f64;
    let mut expectation = 0.0;
    for throw in catalog.throws(num_dice) {
        let outcome = if throw.is_dead_end(used) {
            penalty
        } else {
            let (action, face) = decide(policy, catalog, cache, throw, board, score, used, None);
            if action == Action::GiveUp {
                penalty
            } else {
                let count = throw.histogram[face] as usize;
                let new_score = score + count * FACE_SCORE[face];
                let new_used = dice::use_face(used, face);
                let new_num_dice = num_dice - count;
                if action != Action::Continue || new_num_dice == 0 {
                    board.evaluate(new_score, new_used) as f64
                } else {
                    analyse(policy, catalog, cache, board, new_num_dice, new_score, new_used)
                }
            }
        };
        expectation += throw.probability * outcome;
    }

    cache[slot] = Some(expectation);
    expectation
}

/// Dispatch to the active policy's rule. The throw must not be a dead end;
/// the returned face is meaningless for [`Action::GiveUp`].
#[allow(clippy::too_many_arguments)]
fn decide(
    policy: Policy,
    catalog: &ThrowCatalog,
    cache: &mut [Option<f64>],
    throw: &Throw,
    board: &Board,
    score: usize,
    used: u8,
    trace: Option<&mut Vec<String>>,
) -> (Action, usize) {
    match policy {
        Policy::Optimal => decide_optimal(policy, catalog, cache, throw, board, score, used, trace),
        Policy::Heuristic => decide_heuristic(throw, board, score, used, trace),
        Policy::RiskAverse => {
            decide_risk_averse(policy, catalog, cache, throw, board, score, used, trace)
        }
    }
}

/// Full lookahead: compare stop and continue expectations for every available
/// face, keep the strictly best (ties keep the earliest face in priority
/// order), and give up when even the best fails to beat the bust penalty.
///
/// `policy` is the engine's own policy, not necessarily [`Policy::Optimal`]:
/// when the risk-averse rule falls through to this one, the lookahead still
/// evaluates future states under risk-averse play, against the same cache.
#[allow(clippy::too_many_arguments)]
fn decide_optimal(
    policy: Policy,
    catalog: &ThrowCatalog,
    cache: &mut [Option<f64>],
    throw: &Throw,
    board: &Board,
    score: usize,
    used: u8,
    mut trace: Option<&mut Vec<String>>,
) -> (Action, usize) {
    let mut best: Option<(Action, usize, f64)> = None;
    for (face, count) in throw.available(used, &DEFAULT_ORDER) {
        let new_score = score + count * FACE_SCORE[face];
        let new_used = dice::use_face(used, face);
        let stop_value = board.evaluate(new_score, new_used) as f64;
        if best.map_or(true, |(_, _, value)| stop_value > value + EPSILON) {
            best = Some((Action::Stop, face, stop_value));
        }

        let new_num_dice = throw.num_dice - count;
        let mut continue_value = None;
        if new_num_dice > 0 {
            let value = analyse(policy, catalog, cache, board, new_num_dice, new_score, new_used);
            continue_value = Some(value);
            if best.map_or(true, |(_, _, best_value)| value > best_value + EPSILON) {
                best = Some((Action::Continue, face, value));
            }
        }

        if let Some(trace) = trace.as_deref_mut() {
            let continued = continue_value
                .map(|v| format!("{:.4}", v))
                .unwrap_or_else(|| "-".to_string());
            trace.push(format!(
                "take {}: stop {:.4} continue {}",
                dice::face_to_char(face),
                stop_value,
                continued
            ));
        }
    }

    let (action, face, value) =
        best.expect("dead-end throws are filtered before policy dispatch");
    if value < board.penalty as f64 + EPSILON {
        return (Action::GiveUp, face);
    }
    (action, face)
}

/// Greedy one-step rule with no recursion: the best immediately positive
/// payout if there is one (stopping when fewer than 3 dice would remain),
/// otherwise the first available face in priority order, always rolling on.
fn decide_heuristic(
    throw: &Throw,
    board: &Board,
    score: usize,
    used: u8,
    mut trace: Option<&mut Vec<String>>,
) -> (Action, usize) {
    let mut best: Option<(usize, usize, i32)> = None;
    for (face, count) in throw.available(used, &DEFAULT_ORDER) {
        let new_num_dice = throw.num_dice - count;
        let new_used = dice::use_face(used, face);
        let new_score = score + count * FACE_SCORE[face];
        let evaluation = board.evaluate(new_score, new_used);
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(format!(
                "take {}: {} leaving {} dice",
                dice::face_to_char(face),
                evaluation,
                new_num_dice
            ));
        }
        if best.map_or(true, |(_, _, value)| evaluation > value) {
            best = Some((face, new_num_dice, evaluation));
        }
    }

    match best {
        Some((face, remaining, evaluation)) if evaluation > 0 => {
            let action = if remaining < 3 {
                Action::Stop
            } else {
                Action::Continue
            };
            (action, face)
        }
        _ => {
            let (face, _) = throw
                .available(used, &DEFAULT_ORDER)
                .next()
                .expect("dead-end throws are filtered before policy dispatch");
            (Action::Continue, face)
        }
    }
}

/// Stop on the best immediately positive payout; otherwise play the optimal
/// rule for the same state.
#[allow(clippy::too_many_arguments)]
fn decide_risk_averse(
    policy: Policy,
    catalog: &ThrowCatalog,
    cache: &mut [Option<f64>],
    throw: &Throw,
    board: &Board,
    score: usize,
    used: u8,
    trace: Option<&mut Vec<String>>,
) -> (Action, usize) {
    let mut best: Option<(usize, i32)> = None;
    for (face, count) in throw.available(used, &DEFAULT_ORDER) {
        let new_used = dice::use_face(used, face);
        let new_score = score + count * FACE_SCORE[face];
        let evaluation = board.evaluate(new_score, new_used);
        if best.map_or(true, |(_, value)| evaluation > value) {
            best = Some((face, evaluation));
        }
    }
    if let Some((face, evaluation)) = best {
        if evaluation > 0 {
            return (Action::Stop, face);
        }
    }
    decide_optimal(policy, catalog, cache, throw, board, score, used, trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ALL_FACES;
    use crate::throw::Throw;

    fn sample_board() -> Board {
        Board::new(vec![21, 22, 23, 25, 28, 30], vec![24, 27], Some(26)).unwrap()
    }

    #[test]
    fn test_dead_end_selects_stop_without_face() {
        let board = sample_board();
        let mut strategy = Strategy::new(Policy::Optimal);
        let throw = Throw::from_faces(&[3, 3, 3]).unwrap();
        let choice = strategy.select(&throw, &board, 10, 0b001001);
        assert_eq!(choice, (Action::Stop, None));
    }

    #[test]
    fn test_all_faces_used_analyses_to_penalty() {
        let board = sample_board();
        for policy in [Policy::Optimal, Policy::Heuristic, Policy::RiskAverse] {
            let mut strategy = Strategy::new(policy);
            let ev = strategy.analyse(&board, 2, 30, ALL_FACES);
            assert!((ev - board.penalty as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_board_is_worth_nothing() {
        let board = Board::new(vec![], vec![], None).unwrap();
        let mut strategy = Strategy::new(Policy::Optimal);
        for num_dice in 0..=MAX_DICE {
            assert_eq!(strategy.analyse(&board, num_dice, 0, 0), 0.0);
        }
    }

    #[test]
    fn test_one_die_cannot_reach_any_tile() {
        // Own tile 21 at risk, nothing claimable: a single die can never
        // reach a tile, so the whole turn is worth exactly the penalty.
        let board = Board::new(vec![], vec![], Some(21)).unwrap();
        let mut strategy = Strategy::new(Policy::Optimal);
        let ev = strategy.analyse(&board, 1, 0, 0);
        assert!((ev - -1.0).abs() < 1e-12);
    }

    #[test]
    fn test_analyse_is_idempotent_and_cached() {
        let board = sample_board();
        let mut strategy = Strategy::new(Policy::Optimal);
        let first = strategy.analyse(&board, MAX_DICE, 0, 0);
        let filled = strategy.cached_entries();
        assert!(filled > 0);
        let second = strategy.analyse(&board, MAX_DICE, 0, 0);
        assert_eq!(first.to_bits(), second.to_bits());
        // A pure cache hit computes nothing new
        assert_eq!(strategy.cached_entries(), filled);
    }

    #[test]
    fn test_clear_cache() {
        let board = sample_board();
        let mut strategy = Strategy::new(Policy::Optimal);
        strategy.analyse(&board, MAX_DICE, 0, 0);
        assert!(strategy.cached_entries() > 0);
        strategy.clear_cache();
        assert_eq!(strategy.cached_entries(), 0);
    }

    #[test]
    fn test_optimal_dominates_other_policies() {
        let board = sample_board();
        let mut optimal = Strategy::new(Policy::Optimal);
        let mut heuristic = Strategy::new(Policy::Heuristic);
        let mut risk_averse = Strategy::new(Policy::RiskAverse);
        let best = optimal.analyse(&board, MAX_DICE, 0, 0);
        assert!(best + EPSILON >= heuristic.analyse(&board, MAX_DICE, 0, 0));
        assert!(best + EPSILON >= risk_averse.analyse(&board, MAX_DICE, 0, 0));
    }

    #[test]
    fn test_optimal_gives_up_when_nothing_beats_the_penalty() {
        // Nothing is claimable, so every stop evaluates to the penalty and
        // the only free face (the 1s) cannot change that: give up.
        let board = Board::new(vec![], vec![], Some(25)).unwrap();
        let mut strategy = Strategy::new(Policy::Optimal);
        let throw = Throw::from_faces(&[1, 1]).unwrap();
        // Mask claims everything except face 1; no worm claimed.
        let used = ALL_FACES & !(1 << 1);
        let choice = strategy.select(&throw, &board, 20, used);
        assert_eq!(choice, (Action::GiveUp, None));
    }

    #[test]
    fn test_optimal_stops_on_a_sure_tile() {
        // Score 31 with a worm already claimed and one die left: face 5 lands
        // exactly on the pinchable 36 (worth 4); continuing cannot beat it.
        let board = Board::new(vec![21], vec![36], Some(21)).unwrap();
        let mut strategy = Strategy::new(Policy::Optimal);
        let throw = Throw::from_faces(&[5]).unwrap();
        let choice = strategy.select(&throw, &board, 31, 0b000001);
        assert_eq!(choice, (Action::Stop, Some(5)));
    }

    #[test]
    fn test_heuristic_continues_without_positive_option() {
        let board = Board::new(vec![30], vec![], None).unwrap();
        let mut strategy = Strategy::new(Policy::Heuristic);
        // 8 dice thrown, nothing positive yet: grab the first face in
        // priority order (the worm) and roll on.
        let throw = Throw::from_faces(&[0, 1, 1, 2, 3, 3, 4, 5]).unwrap();
        let choice = strategy.select(&throw, &board, 0, 0);
        assert_eq!(choice, (Action::Continue, Some(0)));
    }

    #[test]
    fn test_heuristic_stops_below_three_dice() {
        let board = Board::new(vec![21], vec![], None).unwrap();
        let mut strategy = Strategy::new(Policy::Heuristic);
        // Worm claimed, score 20: the two 5s reach 30 >= 21 (positive) and
        // leave 1 die, so the heuristic banks.
        let throw = Throw::from_faces(&[5, 5, 2]).unwrap();
        let choice = strategy.select(&throw, &board, 20, 0b000001);
        assert_eq!(choice, (Action::Stop, Some(5)));
    }

    #[test]
    fn test_risk_averse_stops_eagerly() {
        let board = Board::new(vec![21], vec![], None).unwrap();
        let mut strategy = Strategy::new(Policy::RiskAverse);
        // Taking the worm reaches 25 >= 21 with a worm in the mask: a
        // positive payout is available, stop immediately.
        let throw = Throw::from_faces(&[0, 3, 3, 4]).unwrap();
        let choice = strategy.select(&throw, &board, 20, 0);
        assert_eq!(choice, (Action::Stop, Some(0)));
    }

    #[test]
    fn test_risk_averse_defers_to_optimal_otherwise() {
        let board = sample_board();
        let mut risk_averse = Strategy::new(Policy::RiskAverse);
        // Fresh turn, no worm banked yet: no stop is positive, so the rule
        // falls through to the lookahead, which keeps rolling on a rich
        // board rather than giving up a whole turn for nothing.
        for throw in [
            Throw::from_faces(&[0, 1, 2, 3, 4, 5, 5, 5]).unwrap(),
            Throw::from_faces(&[1, 1, 1, 1, 2, 2, 3, 4]).unwrap(),
        ] {
            let (action, face) = risk_averse.select(&throw, &board, 0, 0);
            assert_eq!(action, Action::Continue, "throw {}", throw);
            assert!(face.is_some());
        }
    }

    #[test]
    fn test_trace_is_collected() {
        let board = sample_board();
        let mut strategy = Strategy::new(Policy::Optimal);
        let throw = Throw::from_faces(&[0, 0, 4, 4, 4, 1]).unwrap();
        let mut trace = Vec::new();
        strategy.select_traced(&throw, &board, 0, 0, &mut trace);
        // One line per available face: worm, 4 and 1.
        assert_eq!(trace.len(), 3);
        assert!(trace[0].starts_with("take W"));
    }
}

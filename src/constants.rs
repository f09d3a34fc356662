//! Game constants and the cache-indexing function.
//!
//! Pickomino is played with [`MAX_DICE`] = 8 six-sided dice whose faces are
//! indexed 0..=5. Index 0 is the worm; [`FACE_SCORE`] maps a face index to its
//! point value per die. The highest attainable turn score is
//! [`MAX_SCORE`] = 8 × 5 = 40.
//!
//! Tiles carry printed values 21..=36; [`TILE_VALUES`] maps a tile value to its
//! worth in worms (the quantity the solver maximizes).

/// Number of distinct die faces (worm, 1, 2, 3, 4, 5).
pub const FACE_COUNT: usize = 6;

/// Face index of the worm.
pub const WORM: usize = 0;

/// Maximum number of dice thrown in one turn.
pub const MAX_DICE: usize = 8;

/// Points scored per die, indexed by face. The worm and the 5 face both
/// score 5; faces 1-4 score their face value.
pub const FACE_SCORE: [usize; FACE_COUNT] = [5, 1, 2, 3, 4, 5];

/// Highest attainable accumulated score: 8 dice x 5 points.
pub const MAX_SCORE: usize = MAX_DICE * 5;

/// Claim mask with every face set.
pub const ALL_FACES: u8 = (1 << FACE_COUNT) - 1;

/// Highest printed tile value.
pub const MAX_TILE: usize = 36;

/// Worth of each tile in worms, indexed by printed tile value 0..=36.
/// Values below 21 do not exist on the board and are worth nothing.
pub const TILE_VALUES: [i32; MAX_TILE + 1] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 0 - 9
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 10 - 19
    0, 1, 1, 1, 1, 2, 2, 2, 2, 3, // 20 - 29
    3, 3, 3, 4, 4, 4, 4, // 30 - 36
];

/// n! for n in 0..=13, enough for any multinomial coefficient over 8 dice.
pub const FACTORIALS: [u64; 14] = [
    1,
    1,
    2,
    6,
    24,
    120,
    720,
    5_040,
    40_320,
    362_880,
    3_628_800,
    39_916_800,
    479_001_600,
    6_227_020_800,
];

/// 6^n for n in 0..=8: the number of raw outcomes when throwing n dice.
pub const POWERS_OF_6: [u64; MAX_DICE + 1] =
    [1, 6, 36, 216, 1_296, 7_776, 46_656, 279_936, 1_679_616];

/// Total number of memoization slots: 41 scores x 64 masks x 9 dice counts.
pub const NUM_CACHE_ENTRIES: usize = (MAX_SCORE + 1) * (ALL_FACES as usize + 1) * (MAX_DICE + 1);

/// Map an analysis state (score, claim mask, remaining dice) to a flat cache
/// index. Every valid state gets a unique slot; see [`NUM_CACHE_ENTRIES`].
#[inline(always)]
pub fn cache_index(score: usize, used: u8, num_dice: usize) -> usize {
    debug_assert!(score <= MAX_SCORE, "score {} out of range", score);
    debug_assert!(num_dice <= MAX_DICE, "num_dice {} out of range", num_dice);
    (score * (ALL_FACES as usize + 1) + used as usize) * (MAX_DICE + 1) + num_dice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial_table() {
        for n in 1..FACTORIALS.len() {
            assert_eq!(FACTORIALS[n], FACTORIALS[n - 1] * n as u64);
        }
    }

    #[test]
    fn test_powers_of_6_table() {
        for n in 1..POWERS_OF_6.len() {
            assert_eq!(POWERS_OF_6[n], POWERS_OF_6[n - 1] * 6);
        }
    }

    #[test]
    fn test_cache_index_unique_and_in_range() {
        let mut seen = vec![false; NUM_CACHE_ENTRIES];
        for score in 0..=MAX_SCORE {
            for used in 0..=ALL_FACES {
                for n in 0..=MAX_DICE {
                    let idx = cache_index(score, used, n);
                    assert!(idx < NUM_CACHE_ENTRIES);
                    assert!(!seen[idx], "duplicate index {}", idx);
                    seen[idx] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_tile_values() {
        assert_eq!(TILE_VALUES[20], 0);
        assert_eq!(TILE_VALUES[21], 1);
        assert_eq!(TILE_VALUES[24], 1);
        assert_eq!(TILE_VALUES[25], 2);
        assert_eq!(TILE_VALUES[28], 2);
        assert_eq!(TILE_VALUES[29], 3);
        assert_eq!(TILE_VALUES[32], 3);
        assert_eq!(TILE_VALUES[33], 4);
        assert_eq!(TILE_VALUES[36], 4);
    }
}

//! Throws and the precomputed throw catalog.
//!
//! A [`Throw`] is one concrete outcome of rolling N dice, stored as a per-face
//! histogram together with its exact multinomial probability
//! N! / (h₀!·…·h₅!) / 6^N. Two rolls with the same histogram are the same
//! throw, so the catalog enumerates distinct multisets rather than ordered
//! rolls: C(N+5,5) entries per dice count, 3003 in total for N = 0..=8.
//!
//! [`ThrowCatalog::new`] builds every level eagerly. The enumeration walks all
//! non-decreasing face sequences: starting from all-zero, advance the rightmost
//! position that can still be incremented and fill the suffix with the new
//! value. Each distinct multiset is visited exactly once.

use std::fmt;

use crate::constants::{FACE_COUNT, FACTORIALS, MAX_DICE, POWERS_OF_6, WORM};
use crate::dice;
use crate::error::{Error, Result};

/// Face priority used whenever a caller does not specify one: worm first,
/// then numbered faces from high to low. This is the observable tie-break
/// order of the decision policies.
pub const DEFAULT_ORDER: [usize; FACE_COUNT] = [WORM, 5, 4, 3, 2, 1];

/// One distinct outcome of rolling `num_dice` dice.
#[derive(Clone, Debug, PartialEq)]
pub struct Throw {
    /// Total number of dice in this throw (0..=8).
    pub num_dice: usize,
    /// Count of dice showing each face, summing to `num_dice`.
    pub histogram: [u8; FACE_COUNT],
    /// Exact probability of this histogram under i.i.d. fair rolls.
    pub probability: f64,
}

impl Throw {
    /// Build a throw from raw face indices, e.g. `[0, 0, 4, 4, 4, 1]`.
    pub fn from_faces(faces: &[usize]) -> Result<Self> {
        if faces.len() > MAX_DICE {
            return Err(Error::DiceCountExceeded(faces.len()));
        }
        let mut histogram = [0u8; FACE_COUNT];
        for &face in faces {
            debug_assert!(face < FACE_COUNT, "face {} out of range", face);
            histogram[face] += 1;
        }
        Ok(Self::from_histogram(faces.len(), histogram))
    }

    fn from_histogram(num_dice: usize, histogram: [u8; FACE_COUNT]) -> Self {
        let mut divisor = 1u64;
        for &count in &histogram {
            divisor *= FACTORIALS[count as usize];
        }
        let probability =
            FACTORIALS[num_dice] as f64 / divisor as f64 / POWERS_OF_6[num_dice] as f64;
        Self {
            num_dice,
            histogram,
            probability,
        }
    }

    /// Bitmask of faces present in this throw with a nonzero count.
    pub fn used_faces_mask(&self) -> u8 {
        let mut mask = 0;
        for (face, &count) in self.histogram.iter().enumerate() {
            if count > 0 {
                mask |= 1 << face;
            }
        }
        mask
    }

    /// True iff every face in this throw is already claimed: no legal move
    /// exists and the turn ends in a bust.
    pub fn is_dead_end(&self, used: u8) -> bool {
        self.used_faces_mask() & !used == 0
    }

    /// Iterate the (face, count) pairs present in this throw and not yet
    /// claimed, in the caller-specified priority order.
    pub fn available<'a>(
        &'a self,
        used: u8,
        order: &'a [usize],
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        order.iter().filter_map(move |&face| {
            let count = self.histogram[face] as usize;
            if count > 0 && !dice::contains(used, face) {
                Some((face, count))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (face, &count) in self.histogram.iter().enumerate() {
            for _ in 0..count {
                write!(f, "{}", dice::face_to_char(face))?;
            }
        }
        Ok(())
    }
}

/// All distinct throws for each dice count 0..=[`MAX_DICE`], indexed by count.
///
/// Built once and reused; the recursion in the strategy engine looks levels up
/// on every call, so enumeration cost must not sit on that path.
pub struct ThrowCatalog {
    levels: Vec<Vec<Throw>>,
}

impl ThrowCatalog {
    pub fn new() -> Self {
        let levels = (0..=MAX_DICE).map(generate_level).collect();
        Self { levels }
    }

    /// All distinct throws of `num_dice` dice.
    pub fn throws(&self, num_dice: usize) -> &[Throw] {
        debug_assert!(num_dice <= MAX_DICE, "num_dice {} out of range", num_dice);
        &self.levels[num_dice]
    }
}

impl Default for ThrowCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumerate every distinct throw of `num_dice` dice via the
/// non-decreasing-sequence walk described in the module docs.
fn generate_level(num_dice: usize) -> Vec<Throw> {
    let mut throws = Vec::new();
    let mut faces = vec![0usize; num_dice];
    loop {
        let mut histogram = [0u8; FACE_COUNT];
        for &face in &faces {
            histogram[face] += 1;
        }
        throws.push(Throw::from_histogram(num_dice, histogram));

        // Advance the rightmost position that is below the last face,
        // then fill the suffix with the new value.
        let mut i = num_dice;
        while i > 0 && faces[i - 1] == FACE_COUNT - 1 {
            i -= 1;
        }
        if i == 0 {
            return throws;
        }
        let value = faces[i - 1] + 1;
        for slot in &mut faces[i - 1..] {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ALL_FACES;

    /// C(n+5,5): number of multisets of size n over 6 faces.
    fn multisets(n: usize) -> usize {
        let num: u64 = (1..=5).map(|k| (n + k) as u64).product();
        (num / 120) as usize
    }

    #[test]
    fn test_catalog_sizes() {
        let catalog = ThrowCatalog::new();
        for n in 0..=MAX_DICE {
            assert_eq!(catalog.throws(n).len(), multisets(n), "level {}", n);
        }
        assert_eq!(catalog.throws(8).len(), 1287);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let catalog = ThrowCatalog::new();
        for n in 0..=MAX_DICE {
            let sum: f64 = catalog.throws(n).iter().map(|t| t.probability).sum();
            assert!((sum - 1.0).abs() < 1e-9, "level {} sums to {}", n, sum);
        }
    }

    #[test]
    fn test_catalog_deduplicated() {
        let catalog = ThrowCatalog::new();
        for n in 0..=MAX_DICE {
            let level = catalog.throws(n);
            for i in 0..level.len() {
                for j in (i + 1)..level.len() {
                    assert_ne!(level[i].histogram, level[j].histogram);
                }
            }
        }
    }

    #[test]
    fn test_multinomial_probability() {
        // Two worms, three 4s and a 1: 6!/(2!*1!*3!)/6^6 = 60/46656.
        let throw = Throw::from_faces(&[0, 0, 4, 4, 4, 1]).unwrap();
        assert_eq!(throw.histogram, [2, 1, 0, 0, 3, 0]);
        assert!((throw.probability - 60.0 / 46656.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_many_dice() {
        assert!(matches!(
            Throw::from_faces(&[1; 9]),
            Err(Error::DiceCountExceeded(9))
        ));
    }

    #[test]
    fn test_empty_throw_is_dead_end() {
        let throw = Throw::from_faces(&[]).unwrap();
        assert_eq!(throw.probability, 1.0);
        assert!(throw.is_dead_end(0));
    }

    #[test]
    fn test_dead_end_and_available() {
        let throw = Throw::from_faces(&[0, 0, 4, 4, 4, 1]).unwrap();
        assert_eq!(throw.used_faces_mask(), 0b010011);
        assert!(!throw.is_dead_end(0));
        assert!(!throw.is_dead_end(0b000011)); // 4s still free
        assert!(throw.is_dead_end(0b010011));
        assert!(throw.is_dead_end(ALL_FACES));

        let picks: Vec<_> = throw.available(0, &DEFAULT_ORDER).collect();
        assert_eq!(picks, vec![(0, 2), (4, 3), (1, 1)]);
        let picks: Vec<_> = throw.available(0b000001, &DEFAULT_ORDER).collect();
        assert_eq!(picks, vec![(4, 3), (1, 1)]);
    }

    #[test]
    fn test_display() {
        let throw = Throw::from_faces(&[4, 0, 4, 1]).unwrap();
        assert_eq!(throw.to_string(), "W144");
    }
}

//! Dice: the external randomness the turn controller consumes.
//!
//! The controller never rolls on its own. It accepts a [`DiceRoll`] from a
//! [`DiceSource`], which is either:
//!
//! - [`SeededDice`]: deterministic ChaCha8 stream, capturable and restorable
//! - [`ScriptedDice`]: a fixed queue of rolls, for tests and replays
//!
//! ```
//! use board_ledger::core::{DiceSource, SeededDice};
//!
//! let mut a = SeededDice::new(7);
//! let mut b = SeededDice::new(7);
//! assert_eq!(a.roll(), b.roll());
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on each die.
pub const DIE_FACES: u8 = 6;

/// Two die values, each in `1..=6`.
///
/// Construct through [`DiceRoll::new`], which rejects out-of-range faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    first: u8,
    second: u8,
}

impl DiceRoll {
    /// Returns `None` if either face is outside `1..=6`.
    #[must_use]
    pub fn new(first: u8, second: u8) -> Option<Self> {
        let valid = |d: u8| (1..=DIE_FACES).contains(&d);
        (valid(first) && valid(second)).then_some(Self { first, second })
    }

    #[must_use]
    pub const fn first(self) -> u8 {
        self.first
    }

    #[must_use]
    pub const fn second(self) -> u8 {
        self.second
    }

    /// Combined pip count, 2..=12.
    #[must_use]
    pub const fn total(self) -> u8 {
        self.first + self.second
    }

    #[must_use]
    pub const fn is_double(self) -> bool {
        self.first == self.second
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}", self.first, self.second)
    }
}

/// Anything that can hand the controller a pair of dice.
pub trait DiceSource {
    fn roll(&mut self) -> DiceRoll;
}

/// Deterministic dice backed by ChaCha8.
///
/// Same seed, same sequence. [`SeededDice::state`] captures the stream
/// position in O(1) so a table can be resumed mid-game.
#[derive(Clone, Debug)]
pub struct SeededDice {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededDice {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Uniform index in `0..len`, used by bots that pick among options.
    ///
    /// Returns `None` when `len` is zero.
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// Capture the current stream position.
    #[must_use]
    pub fn state(&self) -> DiceState {
        DiceState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume from a captured position.
    #[must_use]
    pub fn from_state(state: &DiceState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl DiceSource for SeededDice {
    fn roll(&mut self) -> DiceRoll {
        let first = self.inner.gen_range(1..=DIE_FACES);
        let second = self.inner.gen_range(1..=DIE_FACES);
        DiceRoll { first, second }
    }
}

/// Serializable dice position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}

/// Plays back a fixed list of rolls, then falls back to `1+2`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    queue: VecDeque<DiceRoll>,
}

impl ScriptedDice {
    /// Build from `(first, second)` pairs.
    ///
    /// Panics on a face outside `1..=6`; scripts are test fixtures.
    #[must_use]
    pub fn new(rolls: &[(u8, u8)]) -> Self {
        let queue = rolls
            .iter()
            .map(|&(a, b)| {
                DiceRoll::new(a, b).unwrap_or_else(|| panic!("invalid scripted roll {a}+{b}"))
            })
            .collect();
        Self { queue }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> DiceRoll {
        self.queue.pop_front().unwrap_or(DiceRoll { first: 1, second: 2 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_roll_validation() {
        assert!(DiceRoll::new(1, 6).is_some());
        assert!(DiceRoll::new(0, 3).is_none());
        assert!(DiceRoll::new(4, 7).is_none());
    }

    #[test]
    fn test_dice_roll_total_and_double() {
        let roll = DiceRoll::new(3, 3).unwrap();
        assert_eq!(roll.total(), 6);
        assert!(roll.is_double());
        assert!(!DiceRoll::new(2, 5).unwrap().is_double());
        assert_eq!(format!("{}", DiceRoll::new(2, 5).unwrap()), "2+5");
    }

    #[test]
    fn test_seeded_dice_in_range() {
        let mut dice = SeededDice::new(99);
        for _ in 0..500 {
            let roll = dice.roll();
            assert!((1..=6).contains(&roll.first()));
            assert!((1..=6).contains(&roll.second()));
        }
    }

    #[test]
    fn test_seeded_dice_determinism() {
        let mut a = SeededDice::new(42);
        let mut b = SeededDice::new(42);
        for _ in 0..50 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_state_restore_continues_sequence() {
        let mut dice = SeededDice::new(42);
        for _ in 0..30 {
            dice.roll();
        }

        let state = dice.state();
        let expected: Vec<_> = (0..10).map(|_| dice.roll()).collect();

        let mut restored = SeededDice::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll()).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_pick_empty() {
        let mut dice = SeededDice::new(1);
        assert_eq!(dice.pick(0), None);
        assert!(dice.pick(3).unwrap() < 3);
    }

    #[test]
    fn test_scripted_dice_plays_back_in_order() {
        let mut dice = ScriptedDice::new(&[(6, 6), (1, 2)]);
        assert_eq!(dice.roll(), DiceRoll::new(6, 6).unwrap());
        assert_eq!(dice.remaining(), 1);
        assert_eq!(dice.roll(), DiceRoll::new(1, 2).unwrap());
        assert_eq!(dice.remaining(), 0);
    }
}

//! Projection of operators, goals and mutexes through a [`Layout`](crate::Layout).
//!
//! Every compiled form is a word map: word index to the mask/value (packed) or
//! bit set (one-hot) that the emitted code tests or applies on that word.
//! Maps keep the order in which facts first touched a word, so the emitted
//! text is a pure function of the task.
//!
//! - `packed` - binary-encoded preconditions, effects and goal
//! - `mutex` - post-effect guard against mutex facts
//! - `one_hot` - bit-set preconditions, effects and goal, flattened fact indices
//! - `program` - everything one emitter needs, compiled in one place

mod mutex;
mod one_hot;
mod packed;
mod program;

#[cfg(test)]
mod packed_tests;
#[cfg(test)]
mod program_tests;

use indexmap::IndexMap;

pub use mutex::{GuardTest, MutexGuard};
pub use one_hot::{FactIndex, OneHotOperator, compile_one_hot_goal};
pub use packed::{PackedOperator, compile_packed_goal};
pub use program::{Conversion, RelaxedProgram, SearchProgram};

/// Mask and value for one word.
///
/// As a condition: `(word & mask) == value`. As an effect:
/// `(word & mask) | value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordMask {
    pub mask: u64,
    pub value: u64,
}

impl WordMask {
    /// Condition accumulator: tests nothing yet.
    pub const EMPTY: Self = Self { mask: 0, value: 0 };
    /// Effect accumulator: copies the word unchanged.
    pub const IDENTITY: Self = Self {
        mask: u64::MAX,
        value: 0,
    };

    pub fn test(&self, word: u64) -> bool {
        word & self.mask == self.value
    }

    pub fn apply(&self, word: u64) -> u64 {
        (word & self.mask) | self.value
    }
}

/// Packed word map, in first-touch order.
pub type WordMasks = IndexMap<usize, WordMask>;

/// One-hot word map, in first-touch order.
pub type WordBits = IndexMap<usize, u64>;

/// Whether every word condition holds in `words`.
pub fn masks_hold(conditions: &WordMasks, words: &[u64]) -> bool {
    conditions.iter().all(|(&w, m)| m.test(words[w]))
}

/// Whether every required bit is set in `words`.
pub fn bits_hold(conditions: &WordBits, words: &[u64]) -> bool {
    conditions.iter().all(|(&w, &bits)| words[w] & bits == bits)
}

//! Bit allocation of state variables into fixed-width words.
//!
//! A single left-to-right pass over the variables. Each variable gets a
//! contiguous field inside one word. A field that would cross a word boundary
//! starts the next word instead, and the bits left behind stay unused.

use sasgen_core::{Fact, TaskModel};
use serde::Serialize;

use crate::{Error, Result};

/// Widest word the emitted code can address (`uint64_t`).
pub const MAX_WORD_BITS: u32 = 64;

/// How many bits a variable's field takes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidthPolicy {
    /// Minimal binary: `max(1, ceil(log2(domain)))` bits, values compared after masking.
    #[default]
    Packed,
    /// One bit per value, so facts can be accumulated by union.
    OneHot,
}

impl WidthPolicy {
    /// Field width for a variable with `domain_size` values.
    pub fn width(self, domain_size: usize) -> usize {
        match self {
            WidthPolicy::Packed => {
                let bits = usize::BITS - domain_size.saturating_sub(1).leading_zeros();
                (bits as usize).max(1)
            }
            WidthPolicy::OneHot => domain_size,
        }
    }
}

/// Allocator settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LayoutConfig {
    pub word_bits: u32,
    pub policy: WidthPolicy,
}

impl LayoutConfig {
    pub fn packed() -> Self {
        Self {
            word_bits: MAX_WORD_BITS,
            policy: WidthPolicy::Packed,
        }
    }

    pub fn one_hot() -> Self {
        Self {
            word_bits: MAX_WORD_BITS,
            policy: WidthPolicy::OneHot,
        }
    }
}

/// One variable's field.
///
/// `bit_start + bit_length` never exceeds the word size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub word: usize,
    pub bit_start: u32,
    pub bit_length: u32,
    pub read_mask: u64,
    pub clear_mask: u64,
    pub domain_size: usize,
}

impl Slot {
    fn new(word: usize, bit_start: u32, bit_length: u32, domain_size: usize) -> Self {
        let read_mask = low_bits(bit_length) << bit_start;
        Self {
            word,
            bit_start,
            bit_length,
            read_mask,
            clear_mask: !read_mask,
            domain_size,
        }
    }

    /// `value` in binary, truncated to the field width and shifted into place.
    pub fn place(&self, value: usize) -> u64 {
        (value as u64 & low_bits(self.bit_length)) << self.bit_start
    }

    /// Binary value stored in this field of `words`.
    pub fn extract(&self, words: &[u64]) -> usize {
        ((words[self.word] & self.read_mask) >> self.bit_start) as usize
    }

    /// The single bit standing for `value` in a one-hot field.
    ///
    /// Panics when `value` is outside the domain; the shift would leave the
    /// field.
    pub fn one_hot_bit(&self, value: usize) -> u64 {
        assert!(
            value < self.domain_size,
            "Slot: value {value} outside domain of size {}",
            self.domain_size
        );
        1u64 << (self.bit_start as usize + value)
    }
}

fn low_bits(n: u32) -> u64 {
    if n >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Allocation table: one [`Slot`] per variable, in variable order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Layout {
    config: LayoutConfig,
    slots: Vec<Slot>,
    word_count: usize,
}

impl Layout {
    /// Allocate fields for variables with the given domain sizes.
    pub fn allocate(domain_sizes: &[usize], config: LayoutConfig) -> Result<Self> {
        let word_bits = config.word_bits;
        if word_bits == 0 || word_bits > MAX_WORD_BITS {
            return Err(Error::WordSize { word_bits });
        }

        let mut slots = Vec::with_capacity(domain_sizes.len());
        let mut word = 0;
        let mut offset = 0;
        for (var, &domain_size) in domain_sizes.iter().enumerate() {
            if domain_size == 0 {
                return Err(Error::EmptyDomain { var });
            }
            let width = config.policy.width(domain_size);
            if width > word_bits as usize {
                return Err(Error::Allocation {
                    var,
                    width,
                    word_bits,
                });
            }
            if offset + width > word_bits as usize {
                word += 1;
                offset = 0;
            }
            slots.push(Slot::new(word, offset as u32, width as u32, domain_size));
            offset += width;
        }

        let word_count = slots.last().map_or(0, |slot| slot.word + 1);
        Ok(Self {
            config,
            slots,
            word_count,
        })
    }

    /// Allocate fields for every variable of `task`.
    pub fn for_task<T: TaskModel + ?Sized>(task: &T, config: LayoutConfig) -> Result<Self> {
        let layout = Self::allocate(&task.domain_sizes(), config)?;
        tracing::debug!(
            policy = ?config.policy,
            variables = layout.slots.len(),
            words = layout.word_count,
            "allocated state layout"
        );
        Ok(layout)
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    pub fn policy(&self) -> WidthPolicy {
        self.config.policy
    }

    /// Number of words a state occupies.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, var: usize) -> Option<&Slot> {
        self.slots.get(var)
    }

    /// Field of `fact`'s variable, checking the value against its domain.
    pub fn slot_for(&self, fact: Fact) -> Result<&Slot> {
        self.slots
            .get(fact.var)
            .filter(|slot| fact.value < slot.domain_size)
            .ok_or(Error::FactOutOfBounds { fact })
    }

    /// State words for a full assignment, one value per variable.
    pub fn encode(&self, values: &[usize]) -> Result<Vec<u64>> {
        if values.len() != self.slots.len() {
            return Err(Error::InitialState {
                found: values.len(),
                expected: self.slots.len(),
            });
        }

        let mut words = vec![0; self.word_count];
        for (var, &value) in values.iter().enumerate() {
            let slot = self.slot_for(Fact::new(var, value))?;
            words[slot.word] |= match self.policy() {
                WidthPolicy::Packed => slot.place(value),
                WidthPolicy::OneHot => slot.one_hot_bit(value),
            };
        }
        Ok(words)
    }
}

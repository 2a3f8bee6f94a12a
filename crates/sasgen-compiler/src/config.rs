//! Generation settings.

use crate::layout::{LayoutConfig, MAX_WORD_BITS, WidthPolicy};

/// State-storage capacity, in words, when none is configured.
pub const DEFAULT_STORAGE_LENGTH: u64 = 1 << 28;

/// Notation for mask and value literals in the emitted code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Radix {
    /// `0b101ULL`
    #[default]
    Binary,
    /// `0x5ULL`
    Hex,
}

impl Radix {
    /// Render `value` as an unsigned 64-bit C++ literal.
    pub fn literal(self, value: u64) -> String {
        match self {
            Radix::Binary => format!("{value:#b}ULL"),
            Radix::Hex => format!("{value:#x}ULL"),
        }
    }
}

/// Configuration for a generation run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Bits per state word
    pub(crate) word_bits: u32,
    /// Value of `STORAGE_LENGTH` in `config.h`
    pub(crate) storage_length: u64,
    /// Literal notation
    pub(crate) radix: Radix,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_bits: MAX_WORD_BITS,
            storage_length: DEFAULT_STORAGE_LENGTH,
            radix: Radix::default(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of usable bits per state word.
    pub fn word_bits(mut self, value: u32) -> Self {
        self.word_bits = value;
        self
    }

    /// Set the storage capacity written to `config.h`.
    pub fn storage_length(mut self, value: u64) -> Self {
        self.storage_length = value;
        self
    }

    /// Set the literal notation.
    pub fn radix(mut self, value: Radix) -> Self {
        self.radix = value;
        self
    }

    /// Allocator settings for one encoding.
    pub fn layout(&self, policy: WidthPolicy) -> LayoutConfig {
        LayoutConfig {
            word_bits: self.word_bits,
            policy,
        }
    }
}

//! sasgen compiler: state layout, operator compilation, and C++ emission.
//!
//! This crate turns a grounded task into the sources a native search runtime
//! links against:
//! - `layout` - bit allocation of variables into fixed-width words
//! - `compile` - per-word mask/value projection of operators, goals and mutexes
//! - `emit` - C++ text for the successor generator, the relaxed planning graph,
//!   and the configuration headers
//! - `pipeline` - parallel generation of all artifacts and writing them to disk

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;

use sasgen_core::Fact;

pub mod compile;
mod config;
pub mod emit;
pub mod layout;
pub mod pipeline;

#[cfg(test)]
pub mod test_utils;

pub use config::{Config, DEFAULT_STORAGE_LENGTH, Radix};
pub use layout::{Layout, LayoutConfig, Slot, WidthPolicy};
pub use pipeline::{Artifact, Artifacts, generate};

/// Errors that abort code generation.
///
/// None of them is recoverable: a partially generated artifact set is never
/// written.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A variable's field does not fit in one word.
    #[error("variable {var} needs {width} bits but words are {word_bits} bits wide")]
    Allocation {
        var: usize,
        width: usize,
        word_bits: u32,
    },

    #[error("variable {var} has an empty domain")]
    EmptyDomain { var: usize },

    #[error("word size {word_bits} is outside 1..=64")]
    WordSize { word_bits: u32 },

    #[error("task has no goal facts")]
    EmptyGoal,

    #[error("fact {fact} lies outside the state layout")]
    FactOutOfBounds { fact: Fact },

    #[error("initial state assigns {found} values for {expected} variables")]
    InitialState { found: usize, expected: usize },

    #[error("cannot write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, Error>;

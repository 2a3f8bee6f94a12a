//! Reader for the translator's textual `.sas` output.
//!
//! The format is line-oriented: `begin_*`/`end_*` magic lines delimit blocks,
//! counts precede lists, and facts are written as `var value`.

mod lines;
mod parser;


use crate::{Task, TaskError};

pub use parser::FILE_VERSION;

impl Task {
    /// Parse and validate a task from `.sas` text.
    pub fn from_sas(text: &str) -> Result<Self, TaskError> {
        parser::parse(text)
    }
}

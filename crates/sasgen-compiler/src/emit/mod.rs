//! C++ emission from compiled programs.
//!
//! Three outputs:
//! - `search` - `action.cpp`: unrolled successor generator, goal test, initial
//!   state, and a standalone apply API over the packed encoding
//! - `relaxed` - `ff_graph.cpp`: one-hot conversion, goal test, single-layer
//!   relaxed planning graph transition, and fact-index lookups
//! - `headers` - `config.h` and `ff_config.h` constants
//!
//! The runtime declares every emitted function in its own headers; the
//! signatures here must match them exactly.

mod headers;
mod relaxed;
mod search;
mod writer;


pub use headers::{emit_config_header, emit_ff_config_header};
pub use relaxed::emit_relaxed_graph;
pub use search::emit_search;
pub use writer::CodeWriter;

use crate::Radix;
use crate::compile::{WordBits, WordMasks};

/// `((array[w] & M) == V) && ...`, or `None` when there is nothing to test.
fn masks_conjunction(array: &str, words: &WordMasks, radix: Radix) -> Option<String> {
    let terms: Vec<String> = words
        .iter()
        .map(|(w, m)| {
            format!(
                "(({array}[{w}] & {}) == {})",
                radix.literal(m.mask),
                radix.literal(m.value)
            )
        })
        .collect();
    join_terms(terms)
}

/// `((array[w] & B) == B) && ...`, or `None` when there is nothing to test.
fn bits_conjunction(array: &str, words: &WordBits, radix: Radix) -> Option<String> {
    let terms: Vec<String> = words
        .iter()
        .map(|(w, &bits)| {
            let bits = radix.literal(bits);
            format!("(({array}[{w}] & {bits}) == {bits})")
        })
        .collect();
    join_terms(terms)
}

fn join_terms(terms: Vec<String>) -> Option<String> {
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" && "))
    }
}

/// Text safe inside a `//` comment: a backslash would splice the next line
/// into the comment, so it and control characters become `_`.
fn comment_text(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\\' || c.is_control() { '_' } else { c })
        .collect()
}

/// `{1, 4}`
fn int_list(items: &[usize]) -> String {
    let items: Vec<String> = items.iter().map(usize::to_string).collect();
    format!("{{{}}}", items.join(", "))
}

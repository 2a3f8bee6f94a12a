//! Configuration headers read by the runtime's array declarations.

use super::writer::CodeWriter;

/// Render `config.h` for the packed encoding.
pub fn emit_config_header(word_count: usize, storage_length: u64) -> String {
    header(
        "CONFIG_H",
        &[
            ("STATE_LENGTH", word_count.to_string()),
            ("STATE_LENGTH_HEU", "(STATE_LENGTH + 1)".to_owned()),
            ("STORAGE_LENGTH", storage_length.to_string()),
        ],
    )
}

/// Render `ff_config.h` for the one-hot encoding.
pub fn emit_ff_config_header(word_count: usize, fact_count: usize, action_count: usize) -> String {
    header(
        "FF_CONFIG_H",
        &[
            ("FF_STATE_LENGTH", word_count.to_string()),
            ("FACT_NUM", fact_count.to_string()),
            ("ACTION_NUM", action_count.to_string()),
        ],
    )
}

fn header(guard: &str, defines: &[(&str, String)]) -> String {
    let mut w = CodeWriter::new();
    w.line(format!("#ifndef {guard}"));
    w.line(format!("#define {guard}"));
    w.blank();
    for (name, value) in defines {
        w.line(format!("#define {name} {value}"));
    }
    w.blank();
    w.line("#endif");
    w.finish()
}

//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Task file (positional). `.json` selects the JSON reader.
pub fn task_path_arg() -> Arg {
    Arg::new("task_path")
        .value_name("TASK")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Task file (`.sas` translator output or `.json`), `-` for stdin")
}

/// Output directory (-o/--output).
pub fn output_dir_arg() -> Arg {
    Arg::new("output_dir")
        .short('o')
        .long("output")
        .value_name("DIR")
        .default_value(".")
        .value_parser(value_parser!(PathBuf))
        .help("Directory the generated files are written to")
}

/// Word size in bits (--word-bits).
pub fn word_bits_arg() -> Arg {
    Arg::new("word_bits")
        .long("word-bits")
        .value_name("N")
        .value_parser(value_parser!(u32).range(1..=64))
        .help("State word size in bits [default: 64]")
}

/// Runtime state arena size (--storage-length).
pub fn storage_length_arg() -> Arg {
    Arg::new("storage_length")
        .long("storage-length")
        .value_name("N")
        .value_parser(value_parser!(u64))
        .help("State storage size in words [default: 268435456]")
}

/// Hexadecimal mask literals (--hex).
pub fn hex_arg() -> Arg {
    Arg::new("hex")
        .long("hex")
        .action(ArgAction::SetTrue)
        .help("Emit mask literals in hexadecimal instead of binary")
}

/// State encoding (--encoding).
pub fn encoding_arg() -> Arg {
    Arg::new("encoding")
        .long("encoding")
        .value_name("ENCODING")
        .default_value("packed")
        .value_parser(["packed", "one-hot"])
        .help("State encoding to show")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the layout as JSON")
}

/// Log verbosity (-v/--verbose), repeatable, accepted on every command.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log more (-v info, -vv debug)")
}

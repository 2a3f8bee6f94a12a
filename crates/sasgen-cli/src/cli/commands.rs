//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("sasgen")
        .about("Specialize a SAS+ planning task into C++ search code")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(layout_command())
}

/// Generate the search and relaxed-graph sources for a task.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate C++ sources for a task")
        .after_help(
            r#"EXAMPLES:
  sasgen generate output.sas                 # write into the current directory
  sasgen generate output.sas -o build/gen    # write into build/gen
  sasgen generate task.json --hex            # hexadecimal masks
  sasgen generate output.sas --word-bits 32  # 32-bit state words"#,
        )
        .arg(task_path_arg())
        .arg(output_dir_arg())
        .arg(word_bits_arg())
        .arg(storage_length_arg())
        .arg(hex_arg())
}

/// Show how a task's variables are allocated into state words.
pub fn layout_command() -> Command {
    Command::new("layout")
        .about("Show the state layout of a task")
        .after_help(
            r#"EXAMPLES:
  sasgen layout output.sas                     # packed layout
  sasgen layout output.sas --encoding one-hot  # relaxed-graph layout
  sasgen layout task.json --json               # machine-readable"#,
        )
        .arg(task_path_arg())
        .arg(encoding_arg())
        .arg(json_arg())
}

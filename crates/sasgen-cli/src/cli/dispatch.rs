//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use sasgen_compiler::WidthPolicy;

use crate::commands::generate::GenerateArgs;
use crate::commands::layout::LayoutArgs;

pub struct GenerateParams {
    pub task_path: PathBuf,
    pub output_dir: PathBuf,
    pub word_bits: Option<u32>,
    pub storage_length: Option<u64>,
    pub hex: bool,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            task_path: task_path(m),
            output_dir: m
                .get_one::<PathBuf>("output_dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            word_bits: m.get_one::<u32>("word_bits").copied(),
            storage_length: m.get_one::<u64>("storage_length").copied(),
            hex: m.get_flag("hex"),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            task_path: p.task_path,
            output_dir: p.output_dir,
            word_bits: p.word_bits,
            storage_length: p.storage_length,
            hex: p.hex,
        }
    }
}

pub struct LayoutParams {
    pub task_path: PathBuf,
    pub encoding: WidthPolicy,
    pub json: bool,
}

impl LayoutParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            task_path: task_path(m),
            encoding: parse_encoding(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<LayoutParams> for LayoutArgs {
    fn from(p: LayoutParams) -> Self {
        Self {
            task_path: p.task_path,
            encoding: p.encoding,
            json: p.json,
        }
    }
}

// Required by clap, so only absent in matches built by hand.
fn task_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("task_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_encoding(m: &ArgMatches) -> WidthPolicy {
    match m.get_one::<String>("encoding").map(|s| s.as_str()) {
        Some("one-hot") => WidthPolicy::OneHot,
        _ => WidthPolicy::Packed,
    }
}

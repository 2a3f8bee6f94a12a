use std::path::PathBuf;

use sasgen_compiler::{Config, Radix, generate};

use super::task_loader::load_task;
use super::{CommandError, exit_on_error};

pub struct GenerateArgs {
    pub task_path: PathBuf,
    pub output_dir: PathBuf,
    pub word_bits: Option<u32>,
    pub storage_length: Option<u64>,
    pub hex: bool,
}

impl GenerateArgs {
    pub fn config(&self) -> Config {
        let mut config = Config::new();
        if let Some(bits) = self.word_bits {
            config = config.word_bits(bits);
        }
        if let Some(length) = self.storage_length {
            config = config.storage_length(length);
        }
        if self.hex {
            config = config.radix(Radix::Hex);
        }
        config
    }
}

pub fn run(args: GenerateArgs) {
    for path in exit_on_error(execute(&args)) {
        println!("{}", path.display());
    }
}

/// Load, generate, then write. Nothing is written unless generation succeeds.
pub fn execute(args: &GenerateArgs) -> Result<Vec<PathBuf>, CommandError> {
    let task = load_task(&args.task_path)?;
    let artifacts = generate(&task, &args.config())?;
    Ok(artifacts.write_to(&args.output_dir)?)
}

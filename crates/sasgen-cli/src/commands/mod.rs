pub mod generate;
pub mod layout;
pub mod task_loader;

#[cfg(test)]
mod test_utils;

use task_loader::LoadError;

/// Failure of a command before or during generation.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Generate(#[from] sasgen_compiler::Error),

    #[error("cannot render layout as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print the error and exit with status 1.
pub fn exit_on_error<T>(result: Result<T, CommandError>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}

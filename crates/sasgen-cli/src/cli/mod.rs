mod args;
mod commands;
mod dispatch;


use tracing::Level;

pub use commands::build_cli;
pub use dispatch::{GenerateParams, LayoutParams};

/// Log level for a `-v` count: warnings by default, then info, then debug.
pub fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

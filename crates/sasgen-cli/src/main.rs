mod cli;
mod commands;

use cli::{GenerateParams, LayoutParams, build_cli, log_level};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("generate", m)) => {
            init_logging(m.get_count("verbose"));
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        Some(("layout", m)) => {
            init_logging(m.get_count("verbose"));
            let params = LayoutParams::from_matches(m);
            commands::layout::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(verbose))
        .with_target(false)
        .init();
}

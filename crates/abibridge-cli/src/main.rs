mod cli;
mod commands;

use tracing_subscriber::EnvFilter;

use cli::{DecodeParams, EncodeParams, GenerateParams, TypesParams, build_cli, verbosity};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(
        matches
            .subcommand()
            .map(|(_, m)| verbosity(m))
            .unwrap_or_default(),
    );

    match matches.subcommand() {
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        Some(("types", m)) => {
            let params = TypesParams::from_matches(m);
            commands::types::run(params.into());
        }
        Some(("encode", m)) => {
            let params = EncodeParams::from_matches(m);
            commands::encode::run(params.into());
        }
        Some(("decode", m)) => {
            let params = DecodeParams::from_matches(m);
            commands::decode::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr. `ABIBRIDGE_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env("ABIBRIDGE_LOG").unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

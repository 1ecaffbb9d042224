use clap::Parser;
use hsh::core::config::Config;
use hsh::flags::Flags;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    let flags = Flags::parse();

    let log_level = if flags.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("HSH_LOG").unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let program = env::args().next().unwrap_or_else(|| "hsh".to_string());
    let config = Config::from_flags(program, &flags);

    std::process::exit(hsh::run(config));
}

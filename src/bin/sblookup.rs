use clap::Parser;
use sblookup::cli::{normalise_flags, Cli};
use sblookup::service::{execute_command, INIT_FAILURE_EXIT_CODE};
use sblookup::service_configuration::{default_config_file_location, ServiceConfiguration};
use std::io::{stderr, stdin, stdout};
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_from(normalise_flags(std::env::args_os()));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(stderr)
        .init();

    let config_file_location = match cli.config.clone() {
        Some(location) => location,
        None => match default_config_file_location() {
            Ok(location) => location,
            Err(e) => {
                eprintln!("{e}");
                exit(INIT_FAILURE_EXIT_CODE);
            }
        }
    };

    match ServiceConfiguration::new(&cli, &config_file_location) {
        Ok(config) => {
            let code = execute_command(&config, stdin().lock(), &mut stdout().lock(), &mut stderr());
            exit(code)
        },
        Err(e) => {
            eprintln!("{e}");
            exit(INIT_FAILURE_EXIT_CODE);
        }
    }
}

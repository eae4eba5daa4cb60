use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

const LONG_FLAGS: [&str; 6] = ["apikey", "db", "config", "log-level", "help", "version"];

const EXIT_CODES: &str = "\
Reads one URL per line from STDIN and checks every URL against the Safe Browsing
API. The Safe or Unsafe verdict is printed to STDOUT. If an error occurred, debug
information may be printed to STDERR.

Exit codes:
  0     if all URLs were looked up and are safe.
  1     if at least one URL is not safe.
  128   if at least one URL lookup failed.";

#[derive(Debug, Parser)]
#[command(name = "sblookup", version, about = "Look up URLs with Safe Browsing", after_help = EXIT_CODES)]
pub struct Cli {
    /// Safe Browsing API key
    #[arg(long)]
    pub apikey: Option<String>,
    /// Path to the Safe Browsing database; persistent storage is disabled if omitted
    #[arg(long)]
    pub db: Option<String>,
    /// Path to a configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}


pub fn normalise_flags<I>(args: I) -> Vec<OsString>
    where I: IntoIterator<Item = OsString> {
    let mut terminated = false;

    args
        .into_iter()
        .enumerate()
        .map(|(position, arg)| {
            if position == 0 || terminated {
                return arg;
            }

            if arg.to_str() == Some("--") {
                terminated = true;
                return arg;
            }

            let long_flag = arg
                .to_str()
                .and_then(|text| text.strip_prefix('-'))
                .filter(|flag| is_long_flag(flag))
                .map(|flag| format!("--{flag}"));

            match long_flag {
                Some(flag) => OsString::from(flag),
                None => arg,
            }
        })
        .collect()
}

fn is_long_flag(flag: &str) -> bool {
    let name = flag.split('=').next().unwrap_or_default();

    LONG_FLAGS.contains(&name)
}

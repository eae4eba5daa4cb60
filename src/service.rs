use crate::checker::check_urls;
use crate::errors::AppError;
use crate::safe_browsing::{Config, SafeBrowser};
use crate::service_configuration::Configuration;
use std::io::{BufRead, Write};
use tracing::debug;

pub const INIT_FAILURE_EXIT_CODE: i32 = 1;

pub fn execute_command<T, R, O, E>(config: &T, input: R, out: &mut O, err: &mut E) -> i32
    where T: Configuration, R: BufRead, O: Write, E: Write {
    let api_key = match config.api_key() {
        Some(api_key) => api_key,
        None => {
            writeln!(err, "{}", AppError::MissingApiKey).ok();
            return INIT_FAILURE_EXIT_CODE;
        }
    };

    debug!(config_file = %config.config_file_location().display(), "Configuration resolved");

    let browser = match SafeBrowser::new(Config {
        api_key: api_key.into(),
        api_host: config.api_host().into(),
        db_path: config.db_path().map(|path| path.to_path_buf()),
    }) {
        Ok(browser) => browser,
        Err(e) => {
            writeln!(err, "Unable to initialize Safe Browsing client: {e}").ok();
            return INIT_FAILURE_EXIT_CODE;
        }
    };

    check_urls(input, &browser, out, err).exit_code()
}

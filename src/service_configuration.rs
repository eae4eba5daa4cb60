use crate::cli::Cli;
use crate::errors::AppResult;
use crate::safe_browsing::DEFAULT_API_HOST;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const APP_NAME: &str = "sblookup";

#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FileConfig {
    pub api_host: Option<String>,
    pub api_key: Option<String>,
    pub db_path: Option<String>,
}

pub trait Configuration {
    fn api_host(&self) -> &str;

    fn api_key(&self) -> Option<&str>;

    fn config_file_location(&self) -> &Path;

    fn db_path(&self) -> Option<&Path>;
}

#[derive(Debug)]
pub struct ServiceConfiguration<'a> {
    cli_parameters: &'a Cli,
    config_file: FileConfig,
    config_file_location: &'a Path,
}

impl<'a> ServiceConfiguration<'a> {
    pub fn new(cli_parameters: &'a Cli, config_file_location: &'a Path) -> AppResult<Self> {
        let config_file = if config_file_location.exists() {
            confy::load_path::<FileConfig>(config_file_location)?
        } else {
            FileConfig::default()
        };

        Ok(Self {
            cli_parameters,
            config_file,
            config_file_location,
        })
    }
}

pub fn default_config_file_location() -> AppResult<std::path::PathBuf> {
    Ok(confy::get_configuration_file_path(APP_NAME, None)?)
}

impl<'a> Configuration for ServiceConfiguration<'a> {
    fn api_host(&self) -> &str {
        self.config_file.api_host.as_deref().filter(|v| !v.is_empty()).unwrap_or(DEFAULT_API_HOST)
    }

    fn api_key(&self) -> Option<&str> {
        self.cli_parameters.apikey.as_deref().filter(|v| !v.is_empty())
            .or_else(|| self.config_file.api_key.as_deref().filter(|v| !v.is_empty()))
    }

    fn config_file_location(&self) -> &Path {
        self.config_file_location
    }

    fn db_path(&self) -> Option<&Path> {
        self.cli_parameters.db.as_deref().filter(|v| !v.is_empty())
            .or_else(|| self.config_file.db_path.as_deref().filter(|v| !v.is_empty()))
            .map(Path::new)
    }
}

//! Application configuration.
//!
//! Everything a component needs to know about its surroundings (where the
//! backend lives, where the credential is kept) is resolved once at startup
//! into an [`AppConfig`] and handed to the session and panels explicitly.

use crate::environment::Environment;
use crate::logging::{LogLevel, get_rust_log_level};
use std::path::{Path, PathBuf};

/// Directory under `$HOME` holding all client state.
pub const CONFIG_DIR_NAME: &str = ".fintrack";

/// File name of the persisted credential.
pub const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// File name of the log written while the TUI owns the terminal.
pub const LOG_FILE_NAME: &str = "fintrack.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// The backend deployment in use.
    pub environment: Environment,
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Location of the persisted credential.
    pub credential_path: PathBuf,
    /// Location of the log file.
    pub log_file: PathBuf,
    /// Minimum level written to the log.
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Builds a configuration rooted at `base_dir`.
    pub fn new(base_dir: &Path, environment: Environment) -> Self {
        Self {
            api_url: environment.api_url(),
            environment,
            credential_path: base_dir.join(CREDENTIALS_FILE_NAME),
            log_file: base_dir.join(LOG_FILE_NAME),
            log_level: get_rust_log_level(),
        }
    }

    /// Resolves the configuration from the process environment.
    ///
    /// `FINTRACK_ENVIRONMENT` selects a named backend; an explicit
    /// `api_url` (from `--api-url` or `FINTRACK_API_URL`) wins over it.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if the home directory cannot be determined.
    pub fn resolve(api_url: Option<String>) -> Result<Self, std::io::Error> {
        let environment = match api_url {
            Some(url) => Environment::Custom { api_url: url },
            None => std::env::var("FINTRACK_ENVIRONMENT")
                .ok()
                .and_then(|s| s.parse::<Environment>().ok())
                .unwrap_or_default(),
        };
        Ok(Self::new(&get_config_dir()?, environment))
    }
}

/// Returns `$HOME/.fintrack`.
pub fn get_config_dir() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Unable to determine home directory",
        )
    })?;
    Ok(home.join(CONFIG_DIR_NAME))
}

//! CLI configuration.
//!
//! Configuration values come from the environment, not hardcoded call
//! sites, so the same binary points at local and deployed backends.

use std::path::PathBuf;

/// Runtime configuration for the CLI
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend REST API
    pub api_url: String,

    /// Path of the JSON file backing persisted local state
    pub state_file: PathBuf,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// - `DONELIST_API_URL` (default `http://localhost:8000`)
    /// - `DONELIST_STATE_FILE` (default `.donelist/state.json`)
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: std::env::var("DONELIST_API_URL").unwrap_or(defaults.api_url),
            state_file: std::env::var_os("DONELIST_STATE_FILE")
                .map_or(defaults.state_file, PathBuf::from),
        }
    }

    /// Override the API base URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Override the state file path
    #[must_use]
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = path.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            state_file: PathBuf::from(".donelist/state.json"),
        }
    }
}

//! Configuration model loaded from external sources.

use std::env;
use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::state::{DEFAULT_SEARCH_DEBOUNCE, DEFAULT_SEARCH_MIN_CHARS, SearchSettings};

pub const DEFAULT_SUBMIT_PATH: &str = "/reception/create/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
/// Settings of one reception form controller.
pub struct ReceptionSettings {
    pub base_url: String,
    #[serde(default = "default_submit_path")]
    pub submit_path: String,
    /// Anti-forgery token echoed in the `X-CSRFToken` header.
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_submit_path() -> String {
    DEFAULT_SUBMIT_PATH.to_string()
}

fn default_search_min_chars() -> usize {
    DEFAULT_SEARCH_MIN_CHARS
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE.as_millis() as u64
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ReceptionSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            submit_path: default_submit_path(),
            csrf_token: String::new(),
            search_min_chars: default_search_min_chars(),
            search_debounce_ms: default_search_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ReceptionSettings {
    /// Reads `default.yaml`, the optional `{app_env}.yaml` and `APP_*` variables.
    pub fn load(config_dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from(config_dir.join("default")))
            .add_source(File::from(config_dir.join(app_env)).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects search tunables that would query the directory for
    /// near-empty input or on every keystroke.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_min_chars < DEFAULT_SEARCH_MIN_CHARS {
            return Err(ConfigError::Message(format!(
                "search_min_chars must be at least {DEFAULT_SEARCH_MIN_CHARS}, got {}",
                self.search_min_chars
            )));
        }
        if self.search_debounce_ms == 0 {
            return Err(ConfigError::Message(
                "search_debounce_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads `.env`, picks the profile from `APP_ENV` (defaults to `local`)
    /// and reads `./config`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
        Self::load(Path::new("config"), &app_env)
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            min_chars: self.search_min_chars,
            debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }
}

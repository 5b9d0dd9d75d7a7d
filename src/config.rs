//! TOML configuration with environment variable substitution.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use voiceform_core::SessionConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub session: SessionSection,
}

/// Browser connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote-debugging endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

/// Speech backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Backend name: "console" or "http".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Base URL of the speech service (http backend only).
    #[serde(default = "default_speech_url")]
    pub url: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: default_speech_url(),
        }
    }
}

fn default_backend() -> String {
    "console".to_string()
}

fn default_speech_url() -> String {
    "http://localhost:7071".to_string()
}

/// Session timing and retry configuration, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSection {
    pub name_timeout_secs: Option<u64>,
    pub standard_timeout_secs: Option<u64>,
    pub textarea_timeout_secs: Option<u64>,
    pub confirm_timeout_secs: Option<u64>,
    pub max_capture_retries: Option<u32>,
    pub field_pause_secs: Option<u64>,
    pub search_roots: Option<Vec<String>>,
}

impl SessionSection {
    /// Session config with unset knobs left at their defaults.
    pub fn to_session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::default();
        if let Some(secs) = self.name_timeout_secs {
            config.name_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.standard_timeout_secs {
            config.standard_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.textarea_timeout_secs {
            config.textarea_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.confirm_timeout_secs {
            config.confirm_timeout = Duration::from_secs(secs);
        }
        if let Some(cap) = self.max_capture_retries {
            config.max_capture_retries = Some(cap);
        }
        if let Some(secs) = self.field_pause_secs {
            config.field_pause = Duration::from_secs(secs);
        }
        if let Some(roots) = &self.search_roots {
            config.search_roots = Some(
                roots
                    .iter()
                    .map(|r| shellexpand::tilde(r).to_string().into())
                    .collect(),
            );
        }
        config
    }
}

impl Config {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }
}

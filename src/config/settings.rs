//! TOML-based configuration for Facet.
//!
//! Supports a config file (facet.toml) with environment variable expansion,
//! so API keys stay out of both source and config files.
//!
//! Example configuration:
//! ```toml
//! [llm]
//! api_key = "${OPENAI_API_KEY}"
//! model = "gpt-4o-mini"
//! base_url = "https://api.openai.com/v1"
//! timeout_seconds = 30
//!
//! [naming]
//! reserved = ["status"]
//! suffix_len = 5
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("No API key configured: set [llm] api_key in facet.toml or OPENAI_API_KEY")]
    MissingApiKey,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// SQL generation settings.
    #[serde(default)]
    pub llm: LlmSettings,

    /// Identifier and table-name generation settings.
    #[serde(default)]
    pub naming: NamingSettings,
}

/// SQL generation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmSettings {
    /// API key (supports `${ENV_VAR}` expansion).
    pub api_key: String,

    /// Chat model used for SQL generation.
    pub model: String,

    /// Base URL of the chat-completions API.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl LlmSettings {
    /// Get the API key with environment variables expanded.
    pub fn resolved_api_key(&self) -> Result<String, SettingsError> {
        let key = expand_env_vars(&self.api_key)?;
        if key.trim().is_empty() {
            return Err(SettingsError::MissingApiKey);
        }
        Ok(key)
    }
}

/// Identifier and table-name generation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingSettings {
    /// Extra reserved fieldnames on top of the storage bookkeeping columns.
    pub reserved: Vec<String>,

    /// Random suffix length on generated table names.
    pub suffix_len: usize,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            reserved: Vec::new(),
            suffix_len: 5,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `FACET_CONFIG`
    /// 2. `./facet.toml`
    /// 3. `~/.config/facet/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        // Check environment variable first
        if let Ok(path) = env::var("FACET_CONFIG") {
            return Self::from_file(&path);
        }

        // Check local directory
        let local_config = PathBuf::from("facet.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        // Check user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("facet").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }
}

/// Expand `${VAR}` and `$VAR` references in a string.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            // Check for ${VAR} or $VAR
            if chars.peek() == Some(&'{') {
                chars.next(); // consume '{'
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }
                let value = env::var(&var_name)
                    .map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
                result.push_str(&value);
            } else {
                // $VAR (ends at non-alphanumeric/underscore)
                let mut var_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        var_name.push(chars.next().unwrap());
                    } else {
                        break;
                    }
                }
                if var_name.is_empty() {
                    // Just a lone $, keep it
                    result.push('$');
                } else {
                    let value = env::var(&var_name)
                        .map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
                    result.push_str(&value);
                }
            }
        } else {
            result.push(c);
        }
    }

    Ok(result)
}

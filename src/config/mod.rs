//! Configuration loading.

mod settings;

pub use settings::{expand_env_vars, LlmSettings, NamingSettings, Settings, SettingsError};

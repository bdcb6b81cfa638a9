//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use schemes_connect_core::Language;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub store_path: PathBuf,
    pub log_level: Level,
    pub request_timeout: Duration,
    pub language: Language,
    pub voice_enabled: bool,
    pub openai_api_key: Option<String>,
    pub tts_voice: String,
    pub sst_model: String,
    pub audio_output_dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        // --- Backend and Storage Settings ---
        let api_base_url = var_or("API_BASE_URL", "http://localhost:8000");
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "API_BASE_URL".to_string(),
                format!("'{}' must start with http:// or https://", api_base_url),
            ));
        }
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let store_path = PathBuf::from(var_or("STORE_PATH", "./.schemes_connect/store.json"));

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let timeout_str = var_or("REQUEST_TIMEOUT_SECS", "30");
        let request_timeout = timeout_str
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "REQUEST_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", timeout_str),
                )
            })?;

        // --- Conversation Settings ---
        let language_str = var_or("LANGUAGE", "en");
        let language = language_str
            .parse::<Language>()
            .map_err(|e| ConfigError::InvalidValue("LANGUAGE".to_string(), e.to_string()))?;

        let voice_str = var_or("VOICE_ENABLED", "true");
        let voice_enabled = parse_flag(&voice_str).ok_or_else(|| {
            ConfigError::InvalidValue(
                "VOICE_ENABLED".to_string(),
                format!("'{}' is not true or false", voice_str),
            )
        })?;

        // --- Speech Provider (optional) ---
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        let tts_voice = var_or("TTS_VOICE", "alloy");
        let sst_model = var_or("SST_MODEL", "whisper-1");
        let audio_output_dir = PathBuf::from(var_or("AUDIO_OUTPUT_DIR", "./.schemes_connect/audio"));

        Ok(Self {
            api_base_url,
            store_path,
            log_level,
            request_timeout,
            language,
            voice_enabled,
            openai_api_key,
            tts_voice,
            sst_model,
            audio_output_dir,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.store_path, PathBuf::from("./.schemes_connect/store.json"));
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.language, Language::English);
        assert!(config.voice_enabled);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.tts_voice, "alloy");
        assert_eq!(config.sst_model, "whisper-1");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("API_BASE_URL", "https://schemes.example.in/"),
            ("RUST_LOG", "debug"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("LANGUAGE", "mr"),
            ("VOICE_ENABLED", "no"),
            ("OPENAI_API_KEY", "sk-test"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "https://schemes.example.in");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.language, Language::Marathi);
        assert!(!config.voice_enabled);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn blank_api_key_counts_as_absent() {
        let config = load(&[("OPENAI_API_KEY", "  ")]).unwrap();
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn invalid_values_name_the_variable() {
        for (name, value) in [
            ("RUST_LOG", "chatty"),
            ("REQUEST_TIMEOUT_SECS", "0"),
            ("LANGUAGE", "fr"),
            ("VOICE_ENABLED", "maybe"),
            ("API_BASE_URL", "localhost:8000"),
        ] {
            match load(&[(name, value)]) {
                Err(ConfigError::InvalidValue(var, _)) => assert_eq!(var, name),
                other => panic!("expected InvalidValue for {name}, got {other:?}"),
            }
        }
    }
}

//! Process configuration loaded from environment variables.
//!
//! Credentials are read once at startup and handed to components as
//! constructor parameters. Nothing below this module reads the environment.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::info;

use crate::ai::DEFAULT_GEMINI_MODEL;
use crate::error::ConfigError;
use crate::security::SecretString;
use crate::types::config::{ChunkConfig, Pacing};

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_KEY: &str = "SUPABASE_KEY";
pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const CHROME_PATH: &str = "CHROME_PATH";

/// Language model settings.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: SecretString,
    pub model: String,
}

/// Offer store settings.
///
/// `endpoint` is a Supabase project URL or a `postgres://` connection string.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub endpoint: String,
    pub api_key: SecretString,
}

impl StoreConfig {
    /// Load only the store settings (enough for reading offers back).
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let endpoint = required(&lookup, SUPABASE_URL, &mut missing);
        let api_key = required(&lookup, SUPABASE_KEY, &mut missing);

        match (endpoint, api_key) {
            (Some(endpoint), Some(api_key)) => Ok(Self {
                endpoint,
                api_key: SecretString::new(api_key),
            }),
            _ => Err(ConfigError::Missing(missing)),
        }
    }

    /// Load the store settings from the process environment and `.env`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok()).context("Store configuration is incomplete")
    }
}

/// Everything a mission run needs.
#[derive(Debug, Clone)]
pub struct HunterConfig {
    pub model: ModelConfig,
    pub store: StoreConfig,

    /// Chrome binary override
    pub chrome_path: Option<PathBuf>,

    pub chunking: ChunkConfig,
    pub pacing: Pacing,
}

impl HunterConfig {
    /// Build configuration from any key lookup.
    ///
    /// Every required variable that is absent or empty is reported at once.
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let gemini_key = required(&lookup, GEMINI_API_KEY, &mut missing);
        let endpoint = required(&lookup, SUPABASE_URL, &mut missing);
        let store_key = required(&lookup, SUPABASE_KEY, &mut missing);

        let (Some(gemini_key), Some(endpoint), Some(store_key)) = (gemini_key, endpoint, store_key)
        else {
            return Err(ConfigError::Missing(missing));
        };

        let model = optional(&lookup, GEMINI_MODEL).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        if model.contains('/') || model.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                var: GEMINI_MODEL,
                reason: format!("'{}' is not a model name", model),
            });
        }

        Ok(Self {
            model: ModelConfig {
                api_key: SecretString::new(gemini_key),
                model,
            },
            store: StoreConfig {
                endpoint,
                api_key: SecretString::new(store_key),
            },
            chrome_path: optional(&lookup, CHROME_PATH).map(PathBuf::from),
            chunking: ChunkConfig::default(),
            pacing: Pacing::default(),
        })
    }

    /// Log the loaded settings with secrets masked.
    pub fn log_summary(&self) {
        info!(
            model = %self.model.model,
            gemini_key = %self.model.api_key.masked(),
            store = %self.store.endpoint,
            store_key = %self.store.api_key.masked(),
            chrome = ?self.chrome_path,
            "Loaded configuration"
        );
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &'static str, missing: &mut Vec<&'static str>) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = optional(lookup, key);
    if value.is_none() {
        missing.push(key);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const COMPLETE: [(&str, &str); 3] = [
        (GEMINI_API_KEY, "AIza-test-key"),
        (SUPABASE_URL, "https://xyz.supabase.co"),
        (SUPABASE_KEY, "service-role-key"),
    ];

    #[test]
    fn test_complete_configuration() {
        let config = HunterConfig::from_lookup(lookup(&COMPLETE)).unwrap();

        assert_eq!(config.model.api_key.expose(), "AIza-test-key");
        assert_eq!(config.model.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.store.endpoint, "https://xyz.supabase.co");
        assert_eq!(config.store.api_key.expose(), "service-role-key");
        assert!(config.chrome_path.is_none());
        assert_eq!(config.chunking, ChunkConfig::default());
    }

    #[test]
    fn test_each_missing_variable_is_named() {
        let err = HunterConfig::from_lookup(lookup(&[(SUPABASE_URL, "https://xyz.supabase.co")]))
            .unwrap_err();

        match &err {
            ConfigError::Missing(names) => assert_eq!(names, &vec![GEMINI_API_KEY, SUPABASE_KEY]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "missing required configuration: GEMINI_API_KEY, SUPABASE_KEY"
        );
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let err = HunterConfig::from_lookup(lookup(&[
            (GEMINI_API_KEY, ""),
            (SUPABASE_URL, "   "),
            (SUPABASE_KEY, "key"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing(ref names) if names == &vec![GEMINI_API_KEY, SUPABASE_URL]));
    }

    #[test]
    fn test_optional_values() {
        let mut pairs = COMPLETE.to_vec();
        pairs.push((GEMINI_MODEL, "gemini-1.5-pro"));
        pairs.push((CHROME_PATH, "/usr/bin/chromium"));

        let config = HunterConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.model.model, "gemini-1.5-pro");
        assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn test_rejects_malformed_model_name() {
        let mut pairs = COMPLETE.to_vec();
        pairs.push((GEMINI_MODEL, "models/gemini flash"));

        assert!(matches!(
            HunterConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Invalid { var: GEMINI_MODEL, .. })
        ));
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let config = HunterConfig::from_lookup(lookup(&COMPLETE)).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("AIza-test-key"));
        assert!(!debug.contains("service-role-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_store_config_needs_only_store_keys() {
        let store = StoreConfig::from_lookup(lookup(&COMPLETE[1..])).unwrap();
        assert_eq!(store.endpoint, "https://xyz.supabase.co");

        let err = StoreConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref names) if names.len() == 2));
    }
}

/*!
 * Application configuration.
 *
 * Handles loading, validating and saving configuration settings.
 * Every option has a serde default so a partial config file stays
 * valid; a missing file is replaced with a generated default.
 */

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Validation thresholds and windows
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// External translation collaborator settings
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Validation thresholds
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidatorConfig {
    /// Word count at which untranslated link text becomes a Warning
    /// rather than an Info
    #[serde(default = "default_link_word_threshold")]
    pub untranslated_link_word_threshold: usize,

    /// Fraction of ascii-only words above which a line counts as
    /// untranslated
    #[serde(default = "default_english_ratio")]
    pub english_ratio_threshold: f64,

    /// Unchanged lines shown before/after each structural diff run
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

/// Settings for the external rewriting service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslatorConfig {
    /// Chat-completions endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Max concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Byte size above which documents are split at passage
    /// boundaries before translation
    #[serde(default = "default_chunk_threshold_bytes")]
    pub chunk_threshold_bytes: usize,
}

fn default_link_word_threshold() -> usize {
    4
}

fn default_english_ratio() -> f64 {
    0.8
}

fn default_context_lines() -> usize {
    2
}

fn default_endpoint() -> String {
    "http://localhost:11434/v1/chat/completions".to_string()
}

// Matches the default endpoint: a locally served Ollama model
fn default_model() -> String {
    "llama2".to_string()
}

fn default_concurrent_requests() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_chunk_threshold_bytes() -> usize {
    60000
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            untranslated_link_word_threshold: default_link_word_threshold(),
            english_ratio_threshold: default_english_ratio(),
            context_lines: default_context_lines(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: String::new(),
            concurrent_requests: default_concurrent_requests(),
            timeout_secs: default_timeout_secs(),
            chunk_threshold_bytes: default_chunk_threshold_bytes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validator: ValidatorConfig::default(),
            translator: TranslatorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Config {
    /// Load a config file, or create and persist a default one if the
    /// path does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let text = std::fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path, e))?;
            let config: Config = serde_json::from_str(&text)
                .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path, e))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            let json = serde_json::to_string_pretty(&config)?;
            std::fs::write(path, json)
                .map_err(|e| anyhow!("Failed to write default config to {:?}: {}", path, e))?;
            Ok(config)
        }
    }

    /// Validate option ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.validator.english_ratio_threshold) {
            return Err(anyhow!(
                "english_ratio_threshold must be within [0, 1], got {}",
                self.validator.english_ratio_threshold
            ));
        }
        if self.translator.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }
        if self.translator.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

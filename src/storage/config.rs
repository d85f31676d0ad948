//! JSON Configuration Management
//!
//! Handles reading and writing the assistant configuration file. The API key
//! is preferably sourced from the `GEMINI_API_KEY` environment variable;
//! the on-disk file carries model names and generation parameters.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};
use vpn_commander_llm::{ProviderConfig, ProviderType};

/// Environment variable consulted for the API key
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Directory under the platform config dir holding our file
const CONFIG_DIR: &str = "vpn-commander";

/// Configuration file name
const CONFIG_FILE: &str = "config.json";

/// Assistant configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// API key; the environment variable takes precedence over the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Provider base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model used by the analyze and explain flows
    #[serde(default = "default_fast_model")]
    pub fast_model: String,
    /// Model used by the plan flow
    #[serde(default = "default_planning_model")]
    pub planning_model: String,
    /// Maximum tokens to generate per call
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Generation temperature (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_fast_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_planning_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_max_output_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            fast_model: default_fast_model(),
            planning_model: default_planning_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl AssistantConfig {
    /// Validate field ranges. Returns a message on the first violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.fast_model.is_empty() {
            return Err("fast_model must not be empty".to_string());
        }
        if self.planning_model.is_empty() {
            return Err("planning_model must not be empty".to_string());
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }

    /// Overlay environment-sourced values onto this configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
    }

    /// Provider configuration for the Gemini client. The default model is the
    /// fast model; flows override per request.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: ProviderType::Gemini,
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.fast_model.clone(),
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
        }
    }
}

/// Configuration service managing the on-disk file
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AssistantConfig,
}

impl ConfigService {
    /// Create a config service over the default platform path, loading the
    /// existing file or creating defaults.
    pub fn new() -> AppResult<Self> {
        Self::from_path(default_config_path()?)
    }

    /// Create a config service over an explicit path.
    pub fn from_path(config_path: PathBuf) -> AppResult<Self> {
        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let default_config = AssistantConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            default_config
        };
        config.apply_env_overrides();

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AssistantConfig> {
        let content = fs::read_to_string(path)?;
        let config: AssistantConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AssistantConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> AssistantConfig {
        self.config.clone()
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        self.config.apply_env_overrides();
        Ok(())
    }

    /// Check if the config service is healthy
    pub fn is_healthy(&self) -> bool {
        self.config_path.exists() && self.config.validate().is_ok()
    }
}

/// Default configuration file path under the platform config dir
fn default_config_path() -> AppResult<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| AppError::config("could not determine the platform config directory"))?;
    Ok(base.join(CONFIG_DIR).join(CONFIG_FILE))
}

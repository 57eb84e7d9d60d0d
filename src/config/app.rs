//! Main application configuration
//!
//! This module defines the top-level configuration for a rating run, including
//! TOML file loading, environment variable overrides and validation.

use crate::config::{LeaderboardConfig, RatingConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub leaderboard: LeaderboardConfig,
    /// Locale for labels, e.g. `en_US` or `ru_RU`
    pub locale: String,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "elo-changes".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    ///
    /// Values are not validated here; call [`validate_config`] once every
    /// override has been applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            locale: "en_US".to_string(),
            ..Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    ///
    /// Like [`AppConfig::from_env`], this leaves validation to the caller.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        if config.locale.is_empty() {
            config.locale = "en_US".to_string();
        }

        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(log_level) = env::var("ELO_LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(locale) = env::var("ELO_LOCALE") {
            self.locale = locale;
        }
        if let Ok(rating) = env::var("ELO_DEFAULT_RATING") {
            self.rating.default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_DEFAULT_RATING value: {}", rating))?;
        }
        if let Ok(primary) = env::var("ELO_PRIMARY_DISCIPLINE") {
            self.leaderboard.primary = primary
                .parse()
                .map_err(|e| anyhow!("Invalid ELO_PRIMARY_DISCIPLINE value: {}", e))?;
        }
        if let Ok(secondary) = env::var("ELO_SECONDARY_DISCIPLINE") {
            self.leaderboard.secondary = secondary
                .parse()
                .map_err(|e| anyhow!("Invalid ELO_SECONDARY_DISCIPLINE value: {}", e))?;
        }
        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if !config.rating.default_rating.is_finite() {
        return Err(anyhow!("Default rating must be a finite number"));
    }

    if let Some(placeholder) = &config.leaderboard.missing_rating {
        if placeholder.is_empty() {
            return Err(anyhow!("Missing rating placeholder cannot be empty"));
        }
    }

    // Validate leaderboard layout
    if config.leaderboard.primary == config.leaderboard.secondary {
        return Err(anyhow!(
            "Primary and secondary disciplines must differ (both are {})",
            config.leaderboard.primary
        ));
    }
    if !config.leaderboard.sort_sentinel.is_finite() {
        return Err(anyhow!("Sort sentinel must be a finite number"));
    }
    if config.leaderboard.rating_precision > 6 {
        return Err(anyhow!("Rating precision cannot exceed 6 decimal places"));
    }

    Ok(())
}

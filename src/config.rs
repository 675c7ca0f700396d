//! Configuration management for `HotelScope`
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::HotelScopeError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotelScopeConfig {
    /// Tourism API configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default dashboard settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Tourism API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// data.go.kr service key
    #[serde(default)]
    pub service_key: Option<String>,
    /// Base URL of the English tourism service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Application name reported to the provider
    #[serde(default = "default_mobile_app")]
    pub mobile_app: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Rows requested per radius query
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Hotels loaded per region
    #[serde(default = "default_roster_size")]
    pub roster_size: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for every cached lookup, in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// POI search radius in meters
    #[serde(default = "default_radius")]
    pub radius_m: u32,
    /// How many nearest POIs to list
    #[serde(default = "default_nearest_count")]
    pub nearest_count: usize,
    /// Per-hotel lookups in flight during roster aggregation
    #[serde(default = "default_roster_concurrency")]
    pub roster_concurrency: usize,
}

// Default value functions
fn default_base_url() -> String {
    "http://apis.data.go.kr/B551011/EngService2".to_string()
}

fn default_mobile_app() -> String {
    "hotel_analysis".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_page_size() -> u32 {
    200
}

fn default_roster_size() -> u32 {
    50
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_radius() -> u32 {
    1000
}

fn default_nearest_count() -> usize {
    5
}

fn default_roster_concurrency() -> usize {
    4
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            service_key: None,
            base_url: default_base_url(),
            mobile_app: default_mobile_app(),
            timeout_seconds: default_timeout(),
            page_size: default_page_size(),
            roster_size: default_roster_size(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius(),
            nearest_count: default_nearest_count(),
            roster_concurrency: default_roster_concurrency(),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl HotelScopeConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // HOTELSCOPE_PROVIDER__SERVICE_KEY -> provider.service_key
        builder = builder.add_source(
            Environment::with_prefix("HOTELSCOPE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: HotelScopeConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hotelscope").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_service_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The service key is optional here; the HTTP client insists on it
    pub fn validate_service_key(&self) -> Result<()> {
        if let Some(key) = &self.provider.service_key {
            if key.trim().is_empty() {
                return Err(HotelScopeError::config(
                    "Service key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if key.len() < 8 {
                return Err(HotelScopeError::config(
                    "Service key appears to be invalid (too short). Please check your key.",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.provider.timeout_seconds == 0 || self.provider.timeout_seconds > 120 {
            return Err(HotelScopeError::config(
                "Provider timeout must be between 1 and 120 seconds",
            )
            .into());
        }

        if self.provider.page_size == 0 || self.provider.page_size > 1000 {
            return Err(
                HotelScopeError::config("Provider page size must be between 1 and 1000").into(),
            );
        }

        if self.provider.roster_size == 0 || self.provider.roster_size > 100 {
            return Err(
                HotelScopeError::config("Roster size must be between 1 and 100").into(),
            );
        }

        if self.cache.ttl_seconds == 0 || self.cache.ttl_seconds > 7 * 24 * 3600 {
            return Err(HotelScopeError::config(
                "Cache TTL must be between 1 second and 1 week",
            )
            .into());
        }

        if self.defaults.radius_m == 0 || self.defaults.radius_m > 20_000 {
            return Err(HotelScopeError::config(
                "Search radius must be between 1 and 20000 meters",
            )
            .into());
        }

        if self.defaults.nearest_count == 0 {
            return Err(HotelScopeError::config("Nearest count must be at least 1").into());
        }

        if self.defaults.roster_concurrency == 0 || self.defaults.roster_concurrency > 16 {
            return Err(HotelScopeError::config(
                "Roster concurrency must be between 1 and 16",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(HotelScopeError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(HotelScopeError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(HotelScopeError::config(
                "Provider base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

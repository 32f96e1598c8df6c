//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub media: MediaConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub host: String,
    /// Port number (e.g., 8080)
    pub port: u16,
}

/// Database configuration (SQLite only)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    pub path: PathBuf,
}

/// Upstream generative API configuration
///
/// The API credential itself is never configured here; callers supply
/// it per generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the generative language API
    /// e.g., "https://generativelanguage.googleapis.com"
    pub api_base_url: String,
    /// Model used for the search and formatting text calls
    pub text_model: String,
    /// Model used for per-article illustration calls
    pub image_model: String,
}

/// Image compression configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Maximum pixel width after downscaling (default: 600)
    pub max_width: u32,
    /// JPEG quality used when WebP encoding is unavailable (1-100, default: 70)
    pub jpeg_quality: u8,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (KIDSPOST_*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.path", "data/kidspost.db")?
            .set_default(
                "generation.api_base_url",
                "https://generativelanguage.googleapis.com",
            )?
            .set_default("generation.text_model", "gemini-3-flash-preview")?
            .set_default("generation.image_model", "gemini-3-pro-image-preview")?
            .set_default("media.max_width", 600)?
            .set_default("media.jpeg_quality", 70)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (KIDSPOST_*)
            .add_source(
                Environment::with_prefix("KIDSPOST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.generation.api_base_url.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "generation.api_base_url must not be empty".to_string(),
            ));
        }

        if self.media.max_width == 0 {
            return Err(crate::error::AppError::Config(
                "media.max_width must be greater than 0".to_string(),
            ));
        }

        if !(1..=100).contains(&self.media.jpeg_quality) {
            return Err(crate::error::AppError::Config(
                "media.jpeg_quality must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                path: PathBuf::from("/tmp/kidspost-test.db"),
            },
            generation: GenerationConfig {
                api_base_url: "https://generativelanguage.googleapis.com".to_string(),
                text_model: "gemini-3-flash-preview".to_string(),
                image_model: "gemini-3-pro-image-preview".to_string(),
            },
            media: MediaConfig {
                max_width: 600,
                jpeg_quality: 70,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        let config = valid_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_max_width() {
        let mut config = valid_config();
        config.media.max_width = 0;

        let error = config.validate().expect_err("zero max width must fail");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message)
                if message.contains("media.max_width")
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_jpeg_quality() {
        for quality in [0u8, 101] {
            let mut config = valid_config();
            config.media.jpeg_quality = quality;

            let error = config.validate().expect_err("quality outside 1-100 must fail");
            assert!(matches!(
                error,
                crate::error::AppError::Config(message)
                    if message.contains("media.jpeg_quality")
            ));
        }
    }

    #[test]
    fn validate_rejects_empty_api_base_url() {
        let mut config = valid_config();
        config.generation.api_base_url = "  ".to_string();

        let error = config.validate().expect_err("empty base URL must fail");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message)
                if message.contains("generation.api_base_url")
        ));
    }
}

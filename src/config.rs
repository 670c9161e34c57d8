use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::services::filter::FilterCriteria;

pub const CLIENT_ID_ENV: &str = "AMADEUS_API_KEY";
pub const CLIENT_SECRET_ENV: &str = "AMADEUS_API_SECRET";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub amadeus: AmadeusConfig,

    /// Initial filter values for a fresh search.
    pub filters: FilterCriteria,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn,farefinder=info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmadeusConfig {
    pub base_url: String,

    /// Passenger count sent with every query.
    pub adults: u32,

    /// Upper bound on offers returned by one query.
    pub max_results: u32,

    pub user_agent: String,

    /// Never read from or written to the config file.
    #[serde(skip)]
    pub credentials: Credentials,
}

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            base_url: "https://test.api.amadeus.com".to_string(),
            adults: 1,
            max_results: 5,
            user_agent: "Farefinder/1.0".to_string(),
            credentials: Credentials::default(),
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,

    pub client_secret: String,
}

impl Credentials {
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Reads the API key pair from the process environment, after loading
    /// a `.env` file if one exists. Missing values become empty strings and
    /// only surface once the token exchange is rejected.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            client_id: std::env::var(CLIENT_ID_ENV).unwrap_or_default(),
            client_secret: std::env::var(CLIENT_SECRET_ENV).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.client_id.is_empty() || self.client_secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Loads the first config file found and attaches credentials from the
    /// environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.amadeus.credentials = Credentials::from_env();
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("farefinder").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".farefinder").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    /// Credentials are not checked here; a bad pair surfaces at the first
    /// token exchange.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.amadeus.base_url)
            .with_context(|| format!("Invalid Amadeus base URL: {}", self.amadeus.base_url))?;

        if self.amadeus.max_results == 0 {
            anyhow::bail!("amadeus.max_results must be > 0");
        }

        if self.amadeus.adults == 0 {
            anyhow::bail!("amadeus.adults must be > 0");
        }

        if !FilterCriteria::is_valid_max_price(self.filters.max_price) {
            anyhow::bail!(
                "filters.max_price must be a finite number >= 0, got {}",
                self.filters.max_price
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filter::AirlineFilter;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.amadeus.base_url, "https://test.api.amadeus.com");
        assert_eq!(config.amadeus.adults, 1);
        assert_eq!(config.amadeus.max_results, 5);
        assert_eq!(config.filters.airline, AirlineFilter::Any);
        assert!(config.amadeus.credentials.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_skips_credentials() {
        let mut config = Config::default();
        config.amadeus.credentials = Credentials::new("id-123", "secret-456");

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[amadeus]"));
        assert!(toml_str.contains("[filters]"));
        assert!(!toml_str.contains("secret-456"));
        assert!(!toml_str.contains("id-123"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_format = "json"

            [amadeus]
            max_results = 10

            [filters]
            max_price = 750.0
            airline = "ba"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_format, LogFormat::Json);
        assert_eq!(config.amadeus.max_results, 10);
        assert_eq!(config.filters.max_price, 750.0);
        assert_eq!(config.filters.max_stops, 3);
        assert_eq!(config.filters.airline, AirlineFilter::Code("BA".to_string()));

        assert_eq!(config.amadeus.base_url, "https://test.api.amadeus.com");
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.amadeus.base_url = "http://127.0.0.1:9000".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.amadeus.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = Config::default();
        config.amadeus.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.amadeus.max_results = 0;
        assert!(config.validate().is_err());

        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let mut config = Config::default();
            config.filters.max_price = bad;
            assert!(config.validate().is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_validate_rejects_nan_price_from_file() {
        let config: Config = toml::from_str("[filters]\nmax_price = nan\n").unwrap();
        assert!(config.filters.max_price.is_nan());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let credentials = Credentials::new("id-123", "secret-456");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("id-123"));
        assert!(!debug.contains("secret-456"));
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub providers: ProvidersConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/city-explorer.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,

    /// Directory served for paths that match no API route.
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Upper bound on every provider request, connect to last byte.
    pub request_timeout_seconds: u64,

    pub user_agent: String,

    pub geocode: ProviderConfig,

    pub weather: ProviderConfig,

    pub yelp: ProviderConfig,

    pub movies: ProviderConfig,

    pub meetups: ProviderConfig,

    pub trails: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            user_agent: format!("CityExplorer/{}", env!("CARGO_PKG_VERSION")),
            geocode: ProviderConfig::default(),
            weather: ProviderConfig::default(),
            yelp: ProviderConfig::default(),
            movies: ProviderConfig::default(),
            meetups: ProviderConfig::default(),
            trails: ProviderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Overrides the provider's public endpoint (used by tests and proxies).
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    /// `"pretty"` or `"json"`.
    pub log_format: String,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "city-explorer".to_string());

        Self {
            metrics_enabled: true,
            log_format: "pretty".to_string(),
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = match paths.iter().find(|p| p.exists()) {
            Some(path) => {
                info!("Loading config from: {}", path.display());
                Self::load_from_path(path)?
            }
            None => {
                info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overlays `PORT`, `DATABASE_URL` and the provider API key variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.general.database_path = url;
        }

        let keys = [
            ("GEOCODE_API_KEY", &mut self.providers.geocode),
            ("WEATHER_API_KEY", &mut self.providers.weather),
            ("YELP_API_KEY", &mut self.providers.yelp),
            ("MOVIEDB_API_KEY", &mut self.providers.movies),
            ("MEETUP_API_KEY", &mut self.providers.meetups),
            ("TRAILS_API_KEY", &mut self.providers.trails),
        ];
        for (var, provider) in keys {
            if let Some(key) = lookup(var) {
                provider.api_key = key;
            }
        }

        Ok(())
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
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("city-explorer").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".city-explorer").join("config.toml"));
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

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("Provider request timeout must be > 0 seconds");
        }

        if !self.general.database_path.starts_with("sqlite:") {
            anyhow::bail!(
                "database_path must be a sqlite: URL, got '{}'",
                self.general.database_path
            );
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!("min_db_connections cannot exceed max_db_connections");
        }

        if !matches!(self.observability.log_format.as_str(), "pretty" | "json") {
            anyhow::bail!(
                "Unknown log format '{}', expected 'pretty' or 'json'",
                self.observability.log_format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.providers.request_timeout_seconds, 10);
        assert!(config.providers.weather.base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_sqlite_database() {
        let mut config = Config::default();
        config.general.database_path = "postgres://localhost/explorer".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sqlite:"));

        config.general.database_path = "sqlite::memory:".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[providers]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [providers.weather]
            base_url = "http://localhost:9000"
            api_key = "abc"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(
            config.providers.weather.base_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(config.providers.weather.api_key, "abc");
        assert_eq!(config.providers.request_timeout_seconds, 10);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite:/tmp/explorer.db"),
            ("GEOCODE_API_KEY", "geo"),
            ("MOVIEDB_API_KEY", "tmdb"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env_overrides(|key| env.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.general.database_path, "sqlite:/tmp/explorer.db");
        assert_eq!(config.providers.geocode.api_key, "geo");
        assert_eq!(config.providers.movies.api_key, "tmdb");
        assert!(config.providers.trails.api_key.is_empty());
    }

    #[test]
    fn test_invalid_port_override_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.providers.request_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}

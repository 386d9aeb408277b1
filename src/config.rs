use crate::errors::ConfigError;
use serde::Deserialize;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

const USER_CONFIG_DIR: &str = ".config/revio";
const USER_CONFIG_FILE_NAME: &str = "config.toml";

const ENV_CONFIG_PATH: &str = "REVIO_CONFIG";
const ENV_PORT: &str = "PORT";
const ENV_API_KEY: &str = "API_KEY";
const ENV_ENVIRONMENT: &str = "REVIO_ENV";

const DEFAULT_LATENCY_MS: u64 = 1500;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

/// Review behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewConfig {
    /// Mock model latency applied before each review
    pub simulated_latency: Duration,
    /// Reject reviews whose declared language differs from the detected one
    pub enforce_language: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            enforce_language: false,
        }
    }
}

/// HTTP shell settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// "production" turns on API key checks
    pub environment: String,
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: "development".to_string(),
            api_key: None,
        }
    }
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub review: ReviewConfig,
    pub server: ServerConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
struct PartialReviewConfig {
    #[serde(default)]
    simulated_latency_ms: Option<u64>,
    #[serde(default)]
    enforce_language: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
struct PartialServerConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    environment: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct PartialAppConfig {
    review: Option<PartialReviewConfig>,
    server: Option<PartialServerConfig>,
}

impl AppConfig {
    /// Load the user configuration and apply environment overrides.
    ///
    /// The file is looked up at `$REVIO_CONFIG`, falling back to
    /// `~/.config/revio/config.toml`. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => PathBuf::from(path),
            Err(_) => Self::get_user_file_path(USER_CONFIG_FILE_NAME),
        };
        let config = Self::load_config_from_file(&path)?;
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    fn get_user_file_path(filename: &str) -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| {
            warn!("Could not determine home directory, using current directory");
            PathBuf::from(".")
        });
        home.join(USER_CONFIG_DIR).join(filename)
    }

    pub fn load_config_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Config file not found at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::FileRead(path.to_string_lossy().to_string(), e));
            }
        };
        info!("Loading configuration from {:?}", path);
        Self::from_toml_str(&content, &path.to_string_lossy())
    }

    /// Parse a TOML document, filling anything absent with defaults.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let partial: PartialAppConfig = toml::from_str(content)
            .map_err(|e| ConfigError::TomlParse(origin.to_string(), e))?;

        let defaults = Self::default();

        let partial_review = partial.review.unwrap_or_default();
        let review = ReviewConfig {
            simulated_latency: partial_review
                .simulated_latency_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.review.simulated_latency),
            enforce_language: partial_review
                .enforce_language
                .unwrap_or(defaults.review.enforce_language),
        };

        let partial_server = partial.server.unwrap_or_default();
        let server = ServerConfig {
            host: partial_server.host.unwrap_or(defaults.server.host),
            port: partial_server.port.unwrap_or(defaults.server.port),
            environment: partial_server
                .environment
                .unwrap_or(defaults.server.environment),
            api_key: partial_server.api_key.filter(|key| !key.is_empty()),
        };

        Ok(Self { review, server })
    }

    /// Apply `PORT`, `API_KEY` and `REVIO_ENV` from `lookup`.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
            debug!("Port overridden from environment: {}", self.server.port);
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|key| !key.is_empty()) {
            debug!("API key taken from environment");
            self.server.api_key = Some(key);
        }
        if let Some(environment) = lookup(ENV_ENVIRONMENT) {
            self.server.environment = environment;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.review.simulated_latency, Duration::from_millis(1500));
        assert!(!config.review.enforce_language);
        assert_eq!(config.server.port, 5000);
        assert!(!config.server.is_production());
        assert_eq!(config.server.api_key, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            "[review]\nenforce_language = true\n\n[server]\nport = 8080\napi_key = \"\"\n",
            "inline",
        )
        .unwrap();
        assert!(config.review.enforce_language);
        assert_eq!(config.review.simulated_latency, Duration::from_millis(1500));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.api_key, None);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = AppConfig::from_toml_str("[review\n", "broken.toml").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(origin, _) if origin == "broken.toml"));
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let example = include_str!("../assets/config.example.toml");
        let config = AppConfig::from_toml_str(example, "config.example.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_config_from_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[review]\nsimulated_latency_ms = 0\n[server]\nenvironment = \"production\"\napi_key = \"secret\""
        )
        .unwrap();
        let config = AppConfig::load_config_from_file(file.path()).unwrap();
        assert_eq!(config.review.simulated_latency, Duration::ZERO);
        assert!(config.server.is_production());
        assert_eq!(config.server.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([("PORT", "5002"), ("API_KEY", "k"), ("REVIO_ENV", "Production")]);
        let config = AppConfig::default()
            .with_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 5002);
        assert_eq!(config.server.api_key.as_deref(), Some("k"));
        assert!(config.server.is_production());
    }

    #[test]
    fn test_bad_port_override() {
        let err = AppConfig::default()
            .with_env_overrides(|key| (key == "PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "PORT"));
    }
}

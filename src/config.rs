use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}. Please ensure it is readable.")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Error: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Http,
    Mock,
}

/// Which analyze route the HTTP backend posts images to.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzeRoute {
    /// `POST /analyze` with `image` and `city`.
    #[default]
    Primary,
    /// `POST /disease/analyze` with `image` only.
    Variant,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MockConfig {
    pub latency_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self { latency_ms: 1500 }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub backend: BackendKind,
    pub analyze_route: AnalyzeRoute,
    pub default_city: String,
    pub session_id: String,
    pub request_timeout_secs: u64,
    /// Jump to the Results tab when an analysis succeeds.
    pub navigate_to_results: bool,
    pub log_level: String,
    pub mock: MockConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            backend: BackendKind::Http,
            analyze_route: AnalyzeRoute::Primary,
            default_city: "Thane".to_string(),
            session_id: "web-session".to_string(),
            request_timeout_secs: 60,
            navigate_to_results: true,
            log_level: "info".to_string(),
            mock: MockConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Config, ConfigError> {
        let config = toml::from_str::<Config>(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_base_url ('{}') must start with http:// or https://",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be at least 1".to_string()));
        }
        if self.session_id.trim().is_empty() {
            return Err(ConfigError::Invalid("session_id must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Loads `file_path`. A file that does not exist yields the defaults; any
/// other failure is reported so the UI can show it next to the defaults.
pub fn load_config_from_file(file_path: &Path) -> Result<Config, ConfigError> {
    match fs::read_to_string(file_path) {
        Ok(contents) => Config::from_toml_str(&contents, &file_path.display().to_string()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(source) => Err(ConfigError::Read {
            path: file_path.display().to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from_file(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            backend = "mock"
            default_city = "Pune"
            analyze_route = "variant"

            [mock]
            latency_ms = 10
            "#,
            "config.toml",
        )
        .unwrap();
        assert_eq!(config.backend, BackendKind::Mock);
        assert_eq!(config.analyze_route, AnalyzeRoute::Variant);
        assert_eq!(config.default_city, "Pune");
        assert_eq!(config.mock.latency_ms, 10);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.navigate_to_results);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = Config::from_toml_str("backend = [", "config.toml").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config.toml"));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = Config::from_toml_str("api_base_url = \"ftp://farm\"", "config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "session_id = \"desk-1\"\nrequest_timeout_secs = 5\n").unwrap();
        let config = load_config_from_file(&path).unwrap();
        assert_eq!(config.session_id, "desk-1");
        assert_eq!(config.request_timeout_secs, 5);
    }
}

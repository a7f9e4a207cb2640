//! Service configuration.
//!
//! Values come from the process environment, after an optional `.env` file
//! in the working directory has been merged in.

use std::env;
use std::path::Path;

use thiserror::Error;

/// Default listening port, matching what the frontend proxy expects.
pub const DEFAULT_PORT: u16 = 8001;

/// Default bind host (all interfaces).
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default Gradescope portal root.
pub const DEFAULT_GRADESCOPE_URL: &str = "https://www.gradescope.com";

/// Local development origins allowed by CORS when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `.env` file exists but could not be read or parsed.
    #[error("failed to load {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Application configuration shared by the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name, used in logs and the health probe.
    pub service_name: String,
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API with credentials.
    pub cors_origins: Vec<String>,
    /// Root URL of the Gradescope portal.
    pub gradescope_base_url: String,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads configuration for the named service.
    ///
    /// Reads `.env` first; variables already present in the environment
    /// take precedence over the file. A missing `.env` is fine, a malformed
    /// one is an error.
    pub fn load_with_service(service_name: impl Into<String>) -> Result<Self, ConfigError> {
        load_env_file(Path::new(".env"))?;
        Ok(Self::from_lookup(service_name, |key| env::var(key).ok()))
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(service_name: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("GRADESCOPE_API_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = lookup("SERVER_HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|v| parse_origins(&v))
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect());

        let gradescope_base_url = lookup("GRADESCOPE_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GRADESCOPE_URL.to_string());

        let log_format = lookup("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(LogFormat::Pretty);

        Self {
            service_name: service_name.into(),
            host,
            port,
            cors_origins,
            gradescope_base_url,
            log_format,
        }
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Merges an env file into the process environment.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        // 缺少 .env 文件不是错误
        Err(e) if e.not_found() => Ok(()),
        Err(source) => Err(ConfigError::EnvFile {
            path: path.display().to_string(),
            source,
        }),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup("test", |key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]);
        assert_eq!(config.port, 8001);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_addr(), "0.0.0.0:8001");
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert_eq!(config.gradescope_base_url, "https://www.gradescope.com");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let path = env::temp_dir().join(format!("absent-{}.env", uuid::Uuid::new_v4()));
        assert!(load_env_file(&path).is_ok());
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let path = env::temp_dir().join(format!("malformed-{}.env", uuid::Uuid::new_v4()));
        std::fs::write(&path, "THIS LINE HAS NO EQUALS SIGN\n").unwrap();

        let result = load_env_file(&path);
        std::fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("failed to load "), "{err}");
    }

    #[test]
    fn test_port_from_env() {
        let config = load(&[("GRADESCOPE_API_PORT", "9100")]);
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = load(&[("GRADESCOPE_API_PORT", "not-a-port")]);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_cors_origins_parsed() {
        let config = load(&[("CORS_ORIGINS", " https://a.example/ , ,https://b.example")]);
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = load(&[
            ("GRADESCOPE_BASE_URL", "http://127.0.0.1:9999/"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.gradescope_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.log_format, LogFormat::Json);
    }
}

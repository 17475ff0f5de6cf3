use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ML_SERVICE_URL: &str = "http://localhost:8000";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Invalid ML service URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Optional overrides read from the YAML file named by `RELAY_CONFIG`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    ml_service_url: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    max_upload_bytes: Option<usize>,
    frontend_dir: Option<PathBuf>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Yaml {
            path: display,
            source,
        })
    }
}

/// Process-wide settings, resolved once at startup and handed to the app
/// factory.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL of the inference service, without a trailing slash.
    pub ml_service_url: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Server-side cap on the uploaded file. `None` accepts any size.
    pub max_upload_bytes: Option<usize>,
    /// Built client bundle to serve at `/`.
    pub frontend_dir: Option<PathBuf>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ml_service_url: DEFAULT_ML_SERVICE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            max_upload_bytes: None,
            frontend_dir: None,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, then the optional YAML file, then variables from `lookup`.
    /// Empty variables count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(path) = lookup("RELAY_CONFIG") {
            config.apply_file(FileConfig::load(Path::new(&path))?)?;
        }

        if let Some(url) = lookup("ML_SERVICE_URL") {
            config.ml_service_url = url;
        }
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "PORT")? {
            config.port = port;
        }
        if let Some(secs) = parse_var(&lookup, "ML_SERVICE_TIMEOUT_SECS")? {
            config.request_timeout = timeout_secs("ML_SERVICE_TIMEOUT_SECS", secs)?;
        }
        if let Some(secs) = parse_var(&lookup, "ML_SERVICE_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = timeout_secs("ML_SERVICE_CONNECT_TIMEOUT_SECS", secs)?;
        }
        if let Some(limit) = parse_var(&lookup, "MAX_UPLOAD_BYTES")? {
            config.max_upload_bytes = Some(limit);
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            config.frontend_dir = Some(PathBuf::from(dir));
        }

        config.ml_service_url = normalize_base_url(&config.ml_service_url)?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(url) = file.ml_service_url {
            self.ml_service_url = url;
        }
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = timeout_secs("request_timeout_secs", secs)?;
        }
        if let Some(secs) = file.connect_timeout_secs {
            self.connect_timeout = timeout_secs("connect_timeout_secs", secs)?;
        }
        if file.max_upload_bytes.is_some() {
            self.max_upload_bytes = file.max_upload_bytes;
        }
        if file.frontend_dir.is_some() {
            self.frontend_dir = file.frontend_dir;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.ml_service_url)
    }
}

fn parse_var<T, F>(lookup: F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None),
    }
}

/// A zero timeout would fail every prediction, so it is a config error.
fn timeout_secs(key: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key,
            value: secs.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn write_yaml(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "relay-config-{}-{}.yaml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_without_environment() {
        let config = RelayConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.ml_service_url, "http://localhost:8000");
        assert_eq!(config.predict_url(), "http://localhost:8000/predict");
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert!(config.max_upload_bytes.is_none());
        assert!(config.frontend_dir.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            ("ML_SERVICE_URL", "http://ml:9000/"),
            ("PORT", "8081"),
            ("ML_SERVICE_TIMEOUT_SECS", "2"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("FRONTEND_DIR", "frontend/dist"),
        ]))
        .unwrap();
        assert_eq!(config.predict_url(), "http://ml:9000/predict");
        assert_eq!(config.port, 8081);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.max_upload_bytes, Some(1024));
        assert_eq!(config.frontend_dir, Some(PathBuf::from("frontend/dist")));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config =
            RelayConfig::from_lookup(lookup_from(&[("ML_SERVICE_URL", ""), ("PORT", " ")]))
                .unwrap();
        assert_eq!(config.ml_service_url, DEFAULT_ML_SERVICE_URL);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn rejects_bad_port() {
        let err = RelayConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn rejects_zero_timeouts() {
        let err = RelayConfig::from_lookup(lookup_from(&[("ML_SERVICE_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "ML_SERVICE_TIMEOUT_SECS",
                ..
            }
        ));

        let err =
            RelayConfig::from_lookup(lookup_from(&[("ML_SERVICE_CONNECT_TIMEOUT_SECS", "0")]))
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "ML_SERVICE_CONNECT_TIMEOUT_SECS",
                ..
            }
        ));

        let path = write_yaml("zero-timeout", "request_timeout_secs: 0\n");
        let path_str = path.to_string_lossy().into_owned();
        let err = RelayConfig::from_lookup(lookup_from(&[("RELAY_CONFIG", path_str.as_str())]))
            .unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "request_timeout_secs",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = RelayConfig::from_lookup(lookup_from(&[("ML_SERVICE_URL", "ftp://ml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = RelayConfig::from_lookup(lookup_from(&[("ML_SERVICE_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn yaml_file_is_overridden_by_environment() {
        let path = write_yaml(
            "override",
            "ml_service_url: http://from-file:7000\nport: 6000\nconnect_timeout_secs: 1\n",
        );
        let path_str = path.to_string_lossy().into_owned();
        let config = RelayConfig::from_lookup(lookup_from(&[
            ("RELAY_CONFIG", path_str.as_str()),
            ("PORT", "6001"),
        ]))
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.ml_service_url, "http://from-file:7000");
        assert_eq!(config.port, 6001);
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
    }

    #[test]
    fn yaml_file_rejects_unknown_keys() {
        let path = write_yaml("unknown", "ml_url: http://typo:7000\n");
        let path_str = path.to_string_lossy().into_owned();
        let err = RelayConfig::from_lookup(lookup_from(&[("RELAY_CONFIG", path_str.as_str())]))
            .unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn missing_yaml_file_is_an_error() {
        let err = RelayConfig::from_lookup(lookup_from(&[(
            "RELAY_CONFIG",
            "/nonexistent/relay.yaml",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

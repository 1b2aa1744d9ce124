//! Content-service configuration.
//!
//! # Sources (later wins)
//!
//! ```text
//! ~/.atelier/config.yaml   (optional; or an explicit --config path)
//! .env                     (loaded into the process environment by `load`)
//! CONTENTFUL_* / ATELIER_BIND environment variables
//! ```
//!
//! # API pattern
//!
//! - `load_at(home, …)` / `from_sources(file, lookup)` — explicit inputs; used in tests
//! - `load(…)` — derives home from `dirs::home_dir()` and reads the real environment
//!
//! Space id and delivery access token are required; construction fails
//! before any client is built when either is missing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_SPACE_ID: &str = "CONTENTFUL_SPACE_ID";
pub const ENV_ACCESS_TOKEN: &str = "CONTENTFUL_ACCESS_TOKEN";
pub const ENV_PREVIEW_TOKEN: &str = "CONTENTFUL_PREVIEW_TOKEN";
pub const ENV_MANAGEMENT_TOKEN: &str = "CONTENTFUL_CMA_TOKEN";
pub const ENV_ENVIRONMENT: &str = "CONTENTFUL_ENVIRONMENT";
pub const ENV_BIND: &str = "ATELIER_BIND";

pub const DEFAULT_ENVIRONMENT: &str = "master";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

pub const DELIVERY_HOST: &str = "cdn.contentful.com";
pub const PREVIEW_HOST: &str = "preview.contentful.com";
pub const MANAGEMENT_HOST: &str = "api.contentful.com";

/// Which delivery API the read path talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Published content only.
    #[default]
    Published,
    /// Draft and published content.
    Preview,
}

/// On-disk shape of `config.yaml`; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub space_id: Option<String>,
    pub access_token: Option<String>,
    pub preview_token: Option<String>,
    pub management_token: Option<String>,
    pub environment: Option<String>,
    pub bind: Option<String>,
}

/// Resolved configuration passed into client construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtelierConfig {
    pub space_id: String,
    pub access_token: String,
    pub preview_token: Option<String>,
    pub management_token: Option<String>,
    pub environment: String,
    pub bind: SocketAddr,
}

impl AtelierConfig {
    pub fn delivery_host(&self, mode: DeliveryMode) -> &'static str {
        match mode {
            DeliveryMode::Published => DELIVERY_HOST,
            DeliveryMode::Preview => PREVIEW_HOST,
        }
    }

    /// Token for the given delivery mode; preview needs its own token.
    pub fn delivery_token(&self, mode: DeliveryMode) -> Result<&str, ConfigError> {
        match mode {
            DeliveryMode::Published => Ok(&self.access_token),
            DeliveryMode::Preview => self.preview_token.as_deref().ok_or(ConfigError::Missing {
                key: ENV_PREVIEW_TOKEN,
            }),
        }
    }

    pub fn management_token(&self) -> Result<&str, ConfigError> {
        self.management_token
            .as_deref()
            .ok_or(ConfigError::Missing {
                key: ENV_MANAGEMENT_TOKEN,
            })
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// `<home>/.atelier/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".atelier").join("config.yaml")
}

/// Read a config file. A missing default file is an empty config; callers
/// that name a file explicitly should use [`read_file`].
pub fn load_file_or_default(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    read_file(path)
}

/// Read and parse a config file that must exist.
pub fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge a parsed file with an environment lookup. Environment values win;
/// empty strings count as unset.
pub fn from_sources(
    file: ConfigFile,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AtelierConfig, ConfigError> {
    let pick = |key: &str, from_file: Option<String>| {
        lookup(key)
            .filter(|v| !v.trim().is_empty())
            .or(from_file.filter(|v| !v.trim().is_empty()))
    };

    let space_id = pick(ENV_SPACE_ID, file.space_id).ok_or(ConfigError::Missing {
        key: ENV_SPACE_ID,
    })?;
    let access_token = pick(ENV_ACCESS_TOKEN, file.access_token).ok_or(ConfigError::Missing {
        key: ENV_ACCESS_TOKEN,
    })?;
    let environment = pick(ENV_ENVIRONMENT, file.environment)
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
    let bind_raw = pick(ENV_BIND, file.bind).unwrap_or_else(|| DEFAULT_BIND.to_string());
    let bind = bind_raw
        .parse::<SocketAddr>()
        .map_err(|_| ConfigError::InvalidBind { value: bind_raw })?;

    Ok(AtelierConfig {
        space_id,
        access_token,
        preview_token: pick(ENV_PREVIEW_TOKEN, file.preview_token),
        management_token: pick(ENV_MANAGEMENT_TOKEN, file.management_token),
        environment,
        bind,
    })
}

/// Load with an explicit home directory and environment lookup.
///
/// `explicit` names a config file that must exist; otherwise the default
/// `<home>/.atelier/config.yaml` is read when present.
pub fn load_at(
    home: &Path,
    explicit: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AtelierConfig, ConfigError> {
    let file = match explicit {
        Some(path) => read_file(path)?,
        None => load_file_or_default(&config_path_at(home))?,
    };
    from_sources(file, lookup)
}

/// `load_at` convenience wrapper: honours `.env`, reads the process environment.
pub fn load(explicit: Option<&Path>) -> Result<AtelierConfig, ConfigError> {
    let _ = dotenvy::dotenv();
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    load_at(&home, explicit, |key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_fill_environment_and_bind() {
        let config = from_sources(
            ConfigFile::default(),
            env(&[(ENV_SPACE_ID, "space"), (ENV_ACCESS_TOKEN, "token")]),
        )
        .expect("config");
        assert_eq!(config.environment, "master");
        assert_eq!(config.bind, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.preview_token, None);
    }

    #[test]
    fn missing_space_id_fails_fast() {
        let err = from_sources(ConfigFile::default(), env(&[(ENV_ACCESS_TOKEN, "token")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key: ENV_SPACE_ID }), "got: {err}");
        assert_eq!(err.to_string(), "CONTENTFUL_SPACE_ID is not set");
    }

    #[test]
    fn environment_overrides_file_and_blank_is_unset() {
        let file = ConfigFile {
            space_id: Some("file-space".into()),
            access_token: Some("file-token".into()),
            environment: Some("staging".into()),
            ..ConfigFile::default()
        };
        let config = from_sources(
            file,
            env(&[(ENV_SPACE_ID, "env-space"), (ENV_ENVIRONMENT, "  ")]),
        )
        .expect("config");
        assert_eq!(config.space_id, "env-space");
        assert_eq!(config.access_token, "file-token");
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn preview_mode_requires_preview_token() {
        let config = from_sources(
            ConfigFile::default(),
            env(&[(ENV_SPACE_ID, "s"), (ENV_ACCESS_TOKEN, "t")]),
        )
        .expect("config");
        assert_eq!(config.delivery_token(DeliveryMode::Published).unwrap(), "t");
        assert!(matches!(
            config.delivery_token(DeliveryMode::Preview),
            Err(ConfigError::Missing { key: ENV_PREVIEW_TOKEN })
        ));
        assert_eq!(config.delivery_host(DeliveryMode::Preview), PREVIEW_HOST);
    }

    #[test]
    fn invalid_bind_is_reported() {
        let err = from_sources(
            ConfigFile::default(),
            env(&[
                (ENV_SPACE_ID, "s"),
                (ENV_ACCESS_TOKEN, "t"),
                (ENV_BIND, "not-an-addr"),
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind { .. }));
    }
}

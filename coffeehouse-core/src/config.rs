use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoffeeError, Result};

pub const DATABASE_URL_VAR: &str = "COFFEEHOUSE_DATABASE_URL";
pub const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const USER_VAR: &str = "COFFEEHOUSE_DB_USER";
pub const PASSWORD_VAR: &str = "COFFEEHOUSE_DB_PASSWORD";

/// Connection parameters for the drink store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub database_url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

/// On-disk shape; every key is optional so env vars can fill the gaps
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database_url: Option<String>,
    user: Option<String>,
    password: Option<String>,
}

impl StoreConfig {
    pub fn new(
        database_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            database_url: database_url.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Config file path: ~/.coffeehouse/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".coffeehouse/config.toml")
    }

    /// Load from the config file (if present), then overlay environment variables.
    ///
    /// With `path = None` the default location is used and a missing file is
    /// fine. An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_url(path, None)
    }

    /// Like [`StoreConfig::load`], but `database_url` (e.g. from a CLI flag)
    /// beats every other source.
    pub fn load_with_url(path: Option<&Path>, database_url: Option<String>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CoffeeError::config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                read_file(path)?
            }
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    read_file(&default_path)?
                } else {
                    debug!("no config file at {}", default_path.display());
                    FileConfig::default()
                }
            }
        };

        Self::resolve(file, database_url, |key| env::var(key).ok())
    }

    fn resolve(
        file: FileConfig,
        database_url: Option<String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let database_url = database_url
            .or_else(|| var(DATABASE_URL_VAR))
            .or_else(|| var(FALLBACK_DATABASE_URL_VAR))
            .or(file.database_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                CoffeeError::config(format!(
                    "database_url is not set (use --database-url, {} or {})",
                    DATABASE_URL_VAR,
                    Self::config_path().display()
                ))
            })?;

        Ok(Self {
            database_url,
            user: var(USER_VAR).or(file.user).unwrap_or_default(),
            password: var(PASSWORD_VAR).or(file.password).unwrap_or_default(),
        })
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        CoffeeError::config(format!("failed to read {}: {}", path.display(), e))
    })?;
    toml::from_str(&content).map_err(|source| CoffeeError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            database_url: Some("sqlite://file.db".into()),
            user: Some("file-user".into()),
            password: None,
        };
        let config = StoreConfig::resolve(
            file,
            None,
            vars(&[(DATABASE_URL_VAR, "postgres://db/menu"), (PASSWORD_VAR, "pw")]),
        )
        .unwrap();

        assert_eq!(config.database_url, "postgres://db/menu");
        assert_eq!(config.user, "file-user");
        assert_eq!(config.password, "pw");
    }

    #[test]
    fn test_fallback_database_url() {
        let config = StoreConfig::resolve(
            FileConfig::default(),
            None,
            vars(&[(FALLBACK_DATABASE_URL_VAR, "sqlite::memory:")]),
        )
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.user, "");
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let err = StoreConfig::resolve(FileConfig::default(), None, vars(&[])).unwrap_err();
        assert!(matches!(err, CoffeeError::Config { .. }));
    }

    #[test]
    fn test_explicit_url_wins() {
        let config = StoreConfig::resolve(
            FileConfig::default(),
            Some("sqlite://flag.db".into()),
            vars(&[(DATABASE_URL_VAR, "sqlite://env.db")]),
        )
        .unwrap();
        assert_eq!(config.database_url, "sqlite://flag.db");
    }

    #[test]
    fn test_read_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url = \"sqlite://menu.db\"\nuser = \"sa\"").unwrap();

        let parsed = read_file(file.path()).unwrap();
        assert_eq!(parsed.database_url.as_deref(), Some("sqlite://menu.db"));
        assert_eq!(parsed.user.as_deref(), Some("sa"));
        assert!(parsed.password.is_none());
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url = ").unwrap();

        let err = read_file(file.path()).unwrap_err();
        assert!(matches!(err, CoffeeError::ConfigParse { .. }));
    }

    #[test]
    fn test_explicit_missing_path() {
        let err = StoreConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}

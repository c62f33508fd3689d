//! Shell configuration from environment variables

use std::path::PathBuf;

use thiserror::Error;
use todo_core::storage::DEFAULT_QUOTA_BYTES;
use todo_core::theme::Theme;

pub const DATA_DIR_VAR: &str = "TODO_DATA_DIR";
pub const DEFAULT_THEME_VAR: &str = "TODO_DEFAULT_THEME";
pub const QUOTA_VAR: &str = "TODO_QUOTA_BYTES";
pub const EPHEMERAL_VAR: &str = "TODO_EPHEMERAL";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be `light` or `dark`, got {value:?}")]
    InvalidTheme { var: &'static str, value: String },

    #[error("{var} must be a byte count, got {value:?}")]
    InvalidQuota { var: &'static str, value: String },

    #[error("{var} must be a boolean, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub data_dir: PathBuf,
    /// Used when no theme has been stored yet
    pub default_theme: Theme,
    pub quota_bytes: usize,
    /// Keep everything in memory
    pub ephemeral: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".todo-data"),
            default_theme: Theme::Light,
            quota_bytes: DEFAULT_QUOTA_BYTES,
            ephemeral: false,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup(DEFAULT_THEME_VAR) {
            config.default_theme = value.parse().map_err(|_| ConfigError::InvalidTheme {
                var: DEFAULT_THEME_VAR,
                value,
            })?;
        }

        if let Some(value) = lookup(QUOTA_VAR) {
            config.quota_bytes = value.trim().parse().map_err(|_| ConfigError::InvalidQuota {
                var: QUOTA_VAR,
                value,
            })?;
        }

        if let Some(value) = lookup(EPHEMERAL_VAR) {
            config.ephemeral = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        var: EPHEMERAL_VAR,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShellConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.data_dir, PathBuf::from(".todo-data"));
    }

    #[test]
    fn test_overrides() {
        let config = ShellConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/tmp/todos"),
            (DEFAULT_THEME_VAR, "dark"),
            (QUOTA_VAR, "1024"),
            (EPHEMERAL_VAR, "true"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/todos"));
        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.quota_bytes, 1024);
        assert!(config.ephemeral);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ShellConfig::from_lookup(lookup(&[(DEFAULT_THEME_VAR, "blue")])),
            Err(ConfigError::InvalidTheme { .. })
        ));
        assert!(matches!(
            ShellConfig::from_lookup(lookup(&[(QUOTA_VAR, "lots")])),
            Err(ConfigError::InvalidQuota { .. })
        ));
        assert!(matches!(
            ShellConfig::from_lookup(lookup(&[(EPHEMERAL_VAR, "maybe")])),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }
}

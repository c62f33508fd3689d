//! Theme preference
//!
//! Persisted separately from tasks, as raw `light` / `dark` text.

use std::fmt;
use std::str::FromStr;

use tracing::{error, warn};

use crate::storage::KeyValueStore;
use crate::Error;

/// Storage key holding the theme preference
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::InvalidInput(format!("Unknown theme: {}", other))),
        }
    }
}

/// Theme read on start and written on every change
pub struct ThemePreference<S> {
    storage: S,
    current: Theme,
}

impl<S: KeyValueStore> ThemePreference<S> {
    /// Load the stored theme, falling back to `default` when none is usable
    pub fn load(storage: S, default: Theme) -> Self {
        let current = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                default
            }),
            Ok(None) => default,
            Err(e) => {
                error!("Failed to read theme from storage: {}", e);
                default
            }
        };
        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Change the theme and write it; the in-memory value changes even if the write fails
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()) {
            error!("Failed to save theme to storage: {}", e);
        }
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.toggled());
        self.current
    }
}

//! User settings: `~/.config/datsmith/settings.toml`.
//!
//! Every field is optional. A command-line flag always wins over the file,
//! and the file wins over the built-in default.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use datsmith_core::DigestError;
use datsmith_dat::KeyKind;

use crate::error::CliError;

/// Bucketing key as chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) enum KeyChoice {
    /// Pick the strongest digest every input discloses.
    #[default]
    Auto,
    Fixed(KeyKind),
}

impl fmt::Display for KeyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(key) => write!(f, "{key}"),
        }
    }
}

impl FromStr for KeyChoice {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Fixed)
        }
    }
}

impl TryFrom<String> for KeyChoice {
    type Error = DigestError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<KeyChoice> for String {
    fn from(key: KeyChoice) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyChoice>,
    pub case_sensitive: bool,
    pub parallel: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

/// Canonical path to the settings file: `~/.config/datsmith/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("datsmith").join("settings.toml")
}

impl Settings {
    /// Load the settings file; a missing file gives the defaults.
    pub(crate) fn load() -> Result<Self, CliError> {
        let path = settings_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        Self::parse(&contents)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub(crate) fn to_toml(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::config(e.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;

//! Store configuration.
//!
//! A [`CasConfig`] can be read from TOML or populated from string key/value
//! options (as handed over by a command line or a URL query). Option keys
//! are declared once, in [`OPTIONS`], each with the setter that parses its
//! value.

use afs_sri::Algorithm;
use serde::{Deserialize, Serialize};

use crate::error::{CasError, CasResult};

/// Configuration of a content store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CasConfig {
    /// Digest algorithm used for content the store hashes itself.
    pub algorithm: Algorithm,
    /// Verify written bytes against the integrity string they are written under.
    pub verify_writes: bool,
    /// Refuse all writes.
    pub read_only: bool,
}

impl Default for CasConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha256,
            verify_writes: true,
            read_only: false,
        }
    }
}

type Setter = fn(&mut CasConfig, &str) -> Result<(), String>;

/// Every option key with the setter that applies it.
pub const OPTIONS: &[(&str, Setter)] = &[
    ("cas-algorithm", set_algorithm),
    ("verify-writes", set_verify_writes),
    ("read-only", set_read_only),
];

fn set_algorithm(config: &mut CasConfig, value: &str) -> Result<(), String> {
    config.algorithm = value.parse().map_err(|e: afs_sri::SriError| e.to_string())?;
    Ok(())
}

fn set_verify_writes(config: &mut CasConfig, value: &str) -> Result<(), String> {
    config.verify_writes = parse_bool(value)?;
    Ok(())
}

fn set_read_only(config: &mut CasConfig, value: &str) -> Result<(), String> {
    config.read_only = parse_bool(value)?;
    Ok(())
}

/// Parse a boolean option value, case-insensitively.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" | "enable" => Ok(true),
        "false" | "0" | "no" | "n" | "off" | "disable" => Ok(false),
        _ => Err("invalid bool".to_string()),
    }
}

impl CasConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> CasResult<Self> {
        toml::from_str(text).map_err(|e| CasError::Config(format!("parsing store config: {e}")))
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> CasResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CasError::Config(format!("serializing store config: {e}")))
    }

    /// All option keys understood by [`set_option`](Self::set_option).
    pub fn option_keys() -> Vec<&'static str> {
        OPTIONS.iter().map(|(key, _)| *key).collect()
    }

    /// Apply one string option.
    pub fn set_option(&mut self, key: &str, value: &str) -> CasResult<()> {
        let (_, setter) = OPTIONS
            .iter()
            .find(|(k, _)| *k == key)
            .ok_or_else(|| CasError::UnknownOption {
                key: key.to_string(),
                valid: Self::option_keys(),
            })?;
        setter(self, value).map_err(|reason| CasError::InvalidOptionValue {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        })
    }

    /// Defaults with every option in `options` applied, in iteration order.
    ///
    /// Stops at the first unknown key or unparseable value.
    pub fn from_options<I, K, V>(options: I) -> CasResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in options {
            config.set_option(key.as_ref(), value.as_ref())?;
        }
        Ok(config)
    }
}

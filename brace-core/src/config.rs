//! Compile/render options and the YAML config file that carries them.
//!
//! # Storage layout
//!
//! ```text
//! ~/.brace/
//!   config.yaml
//! ```
//!
//! ```yaml
//! options:
//!   on-missing-field: empty-string   # fail | empty-string
//!   on-unterminated-tag: error       # literal | error
//! defaults:
//!   site: example.org
//! ```
//!
//! As with every `_at` helper here, tests pass an explicit home; the no-arg
//! wrapper derives it from `dirs::home_dir()`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// What a renderer does when the context lacks a referenced field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MissingFieldPolicy {
    /// Abort rendering with [`RenderError::MissingField`](crate::RenderError::MissingField).
    #[default]
    Fail,
    /// Substitute the empty string.
    EmptyString,
}

impl fmt::Display for MissingFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingFieldPolicy::Fail => write!(f, "fail"),
            MissingFieldPolicy::EmptyString => write!(f, "empty-string"),
        }
    }
}

impl FromStr for MissingFieldPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "empty-string" => Ok(Self::EmptyString),
            other => Err(format!(
                "unknown missing-field policy '{other}'; expected: fail, empty-string"
            )),
        }
    }
}

/// What the tokenizer does with a `{{` that is never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnterminatedTagPolicy {
    /// Keep the remainder of the template as literal text.
    #[default]
    Literal,
    /// Fail with [`TemplateError::UnterminatedTag`](crate::TemplateError::UnterminatedTag).
    Error,
}

impl fmt::Display for UnterminatedTagPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnterminatedTagPolicy::Literal => write!(f, "literal"),
            UnterminatedTagPolicy::Error => write!(f, "error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Options / Config
// ---------------------------------------------------------------------------

/// Knobs consulted by [`compile_with`](crate::compile_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct Options {
    pub on_missing_field: MissingFieldPolicy,
    pub on_unterminated_tag: UnterminatedTagPolicy,
}

impl Options {
    pub fn with_missing_field(mut self, policy: MissingFieldPolicy) -> Self {
        self.on_missing_field = policy;
        self
    }

    pub fn with_unterminated_tag(mut self, policy: UnterminatedTagPolicy) -> Self {
        self.on_unterminated_tag = policy;
        self
    }
}

/// On-disk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub options: Options,
    /// Fallback context values, layered beneath caller-supplied data.
    pub defaults: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<home>/.brace/config.yaml`, pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".brace").join("config.yaml")
}

/// Load `<home>/.brace/config.yaml`, or [`Config::default`] when it is absent.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load_from(&path)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    load_at(&home)
}

/// Load a config file at an explicit path.
///
/// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse` (with
/// path + line context) if malformed YAML.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // An empty file deserializes to YAML null; treat it as all-defaults.
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let config = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

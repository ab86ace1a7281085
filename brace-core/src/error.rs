//! Error types for brace-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while compiling a template (tokenize + generate).
///
/// `Clone` so a cache can replay a failed compilation without recompiling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Tag content is not a single bare identifier after trimming.
    #[error("malformed expression '{expression}' at byte {offset}: expected a bare identifier")]
    MalformedExpression { expression: String, offset: usize },

    /// `{{` with no closing `}}`; only raised under the strict tag policy.
    #[error("unterminated tag at byte {offset}: missing closing '}}}}'")]
    UnterminatedTag { offset: usize },
}

/// Errors raised while applying a compiled renderer to a data context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The context has no entry for a field the template references.
    #[error("missing field '{name}' in data context")]
    MissingField { name: String },
}

/// Union returned by the one-shot [`render`](crate::render) façade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BraceError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors from loading a [`Config`](crate::config::Config) file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file did not exist at an explicitly requested path.
    #[error("config not found at {path}")]
    NotFound { path: PathBuf },

    /// YAML parse error, with the offending file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` equivalent was unavailable to the caller.
    #[error("cannot determine home directory; set $HOME or pass --config")]
    HomeNotFound,
}

//! Errors raised while loading relay configuration
//!
//! Every failure here is fatal at start-up, so each variant names the file,
//! variable or field an operator has to fix.

use std::path::PathBuf;
use thiserror::Error;

/// Why the relay configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser message already carries line and column when known
    #[error("cannot parse config file '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("config file references unset variable '{var}'")]
    UnsetVariable { var: String },

    #[error("variable {var} is not usable: {message}")]
    BadVariable { var: String, message: String },
}

/// A configuration field holding a value the relay cannot run with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid config at '{field}': {problem}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `connection.timeout_secs`
    pub field: String,
    pub problem: Problem,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("a non-blank value is required")]
    Blank,

    #[error("{0}")]
    OutOfRange(String),

    #[error("not an http(s) URL: {0}")]
    BadUrl(String),

    #[error("expected exactly {expected} entries, found {found}")]
    WrongCount { expected: usize, found: usize },
}

impl ValidationError {
    pub fn new(field: impl Into<String>, problem: Problem) -> Self {
        Self {
            field: field.into(),
            problem,
        }
    }

    pub fn blank(field: impl Into<String>) -> Self {
        Self::new(field, Problem::Blank)
    }

    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Problem::OutOfRange(message.into()))
    }

    pub fn bad_url(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Problem::BadUrl(message.into()))
    }

    pub fn wrong_count(field: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::new(field, Problem::WrongCount { expected, found })
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

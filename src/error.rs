//! Crate error type
//!
//! The frame step itself never fails. Errors only come from building inputs
//! to the simulation: parsing entity categories by name and loading settings.

use std::fmt;

/// Errors raised while constructing simulation inputs
#[derive(Debug)]
pub enum SimError {
    /// Asteroid size name outside {large, medium, small}
    UnknownAsteroidSize(String),
    /// Saucer type name outside {large, small}
    UnknownSaucerKind(String),
    /// A settings field holds a value the simulation cannot run with
    InvalidSettings {
        field: &'static str,
        reason: String,
    },
    /// Settings JSON could not be parsed
    Config(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownAsteroidSize(name) => {
                write!(f, "unknown asteroid size '{name}' (expected large, medium or small)")
            }
            SimError::UnknownSaucerKind(name) => {
                write!(f, "unknown saucer type '{name}' (expected large or small)")
            }
            SimError::InvalidSettings { field, reason } => {
                write!(f, "invalid setting '{field}': {reason}")
            }
            SimError::Config(err) => write!(f, "malformed settings: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Config(err)
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, missing tool preconditions, malformed surfaces, config parsing,
//! IO, and generic errors.
//!
//! Projection misses and spacing violations are not errors; they are ordinary outcomes of a
//! placement attempt (see [`crate::placement::sampler::AttemptOutcome`]).
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A collaborator the placement tool needs before it can place or preview anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precondition {
    /// No target surface is configured.
    Surface,
    /// No placeable prefab is configured.
    Prefab,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::Surface => f.write_str("target surface"),
            Precondition::Prefab => f.write_str("placeable prefab"),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no {0} configured")]
    PreconditionMissing(Precondition),

    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

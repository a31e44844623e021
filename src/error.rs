//! Error types for the simulation core.

use std::fmt;

/// Conditions a caller must handle instead of reading missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// No descriptor is registered under this identifier.
    UnknownAnimalType(String),
    /// A descriptor was offered before a registry existed to hold it.
    RegistryUnavailable(String),
    /// A tuning table could not be parsed or held a bad value.
    InvalidTweaks(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownAnimalType(id) => write!(f, "unknown animal type: {id}"),
            SimError::RegistryUnavailable(id) => {
                write!(f, "no registry available for animal type {id}")
            }
            SimError::InvalidTweaks(reason) => write!(f, "invalid tweak config: {reason}"),
        }
    }
}

impl std::error::Error for SimError {}

/// Result type for fallible simulation calls.
pub type SimResult<T> = Result<T, SimError>;

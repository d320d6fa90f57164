//! Error types for lunar calculations.
//!
//! A single [`LunarError`] enum covers the failure modes of the workspace:
//! timestamps that cannot be normalized, malformed observer coordinates,
//! and an ephemeris backend that failed or returned inconsistent data.
//! None of the variants is retried anywhere in the core; callers decide
//! how to surface a failure.

use thiserror::Error;

pub type LunarResult<T> = Result<T, LunarError>;

#[derive(Debug, Error)]
pub enum LunarError {
    /// Input timestamp cannot be parsed or normalized.
    #[error("Invalid date: {message}")]
    InvalidDate { message: String },

    /// Observer coordinates are malformed.
    #[error("Invalid observer location: {message}")]
    InvalidLocation { message: String },

    /// The ephemeris dependency failed or returned inconsistent data.
    ///
    /// There is no safe approximation once the bracketing new-moon dates
    /// are not trustworthy, so this is always a hard failure.
    #[error("Ephemeris unavailable: {message}")]
    EphemerisUnavailable { message: String },
}

impl LunarError {
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    pub fn invalid_location(message: impl Into<String>) -> Self {
        Self::InvalidLocation {
            message: message.into(),
        }
    }

    pub fn ephemeris_unavailable(message: impl Into<String>) -> Self {
        Self::EphemerisUnavailable {
            message: message.into(),
        }
    }
}

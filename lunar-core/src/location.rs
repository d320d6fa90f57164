//! Observer location as geodetic latitude/longitude in degrees.
//!
//! The location exists to be handed to an ephemeris backend; the phase
//! and illumination quantities the workspace computes are geocentric and
//! do not depend on it. Validation still happens here so a malformed
//! coordinate is rejected before any ephemeris work starts.

use crate::errors::{LunarError, LunarResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A geographic location on Earth.
///
/// Latitude is north-positive in [-90, 90]; longitude is east-positive
/// in [-180, 180]. Both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl Location {
    /// Creates a location from coordinates in degrees.
    ///
    /// # Errors
    /// Returns `LunarError::InvalidLocation` if either coordinate is
    /// non-finite or outside its valid range.
    pub fn from_degrees(latitude_deg: f64, longitude_deg: f64) -> LunarResult<Self> {
        if !latitude_deg.is_finite() {
            return Err(LunarError::invalid_location("latitude must be finite"));
        }
        if !longitude_deg.is_finite() {
            return Err(LunarError::invalid_location("longitude must be finite"));
        }
        if latitude_deg.abs() > 90.0 {
            return Err(LunarError::invalid_location(format!(
                "latitude outside [-90, 90]: {latitude_deg}"
            )));
        }
        if longitude_deg.abs() > 180.0 {
            return Err(LunarError::invalid_location(format!(
                "longitude outside [-180, 180]: {longitude_deg}"
            )));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude_deg, self.longitude_deg)
    }
}

//! Earth-Moon distance unit conversion.
//!
//! The conversion constants are fixed contract values the display layers
//! were built around; the tests pin them exactly.

use lunar_core::constants::{AU_KM, AU_MILES};

/// Converts astronomical units to kilometers.
pub fn au_to_km(au: f64) -> f64 {
    au * AU_KM
}

/// Converts astronomical units to statute miles.
pub fn au_to_miles(au: f64) -> f64 {
    au * AU_MILES
}

//! The result record for one phase computation.

use crate::classifier::{IlluminationBand, Phase};
use lunar_core::constants::SYNODIC_MONTH_DAYS;
use lunar_core::UTC;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything known about the Moon for one requested instant.
///
/// Built eagerly and in full by
/// [`MoonPhaseCalculator::compute`](crate::MoonPhaseCalculator::compute);
/// immutable afterwards, with no identity beyond its values and nothing
/// cached behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoonObservation {
    /// The instant the observation describes.
    pub timestamp: UTC,
    /// Fractional position in the current synodic month, in [0, 1):
    /// 0 is the new moon, 0.5 the full moon.
    pub cycle_position: f64,
    /// Days elapsed since the bracketing new moon.
    pub moon_age_days: f64,
    /// Percentage of the visible disk that is lit, in [0, 100].
    pub illumination_percent: f64,
    /// Discrete phase classified from `cycle_position`.
    pub phase: Phase,
    /// Geocentric Earth-Moon distance in astronomical units.
    pub earth_to_moon_au: f64,
    /// Distance converted to kilometers.
    pub earth_to_moon_km: f64,
    /// Distance converted to statute miles.
    pub earth_to_moon_miles: f64,
    /// New moon opening the current cycle.
    pub previous_new_moon: UTC,
    /// New moon closing the current cycle.
    pub next_new_moon: UTC,
}

impl MoonObservation {
    /// Age from the cycle position and the mean synodic month.
    ///
    /// An approximation of [`moon_age_days`](Self::moon_age_days): the
    /// true lunation length varies around the mean, so the two may
    /// differ by a few hours.
    pub fn synodic_age_days(&self) -> f64 {
        self.cycle_position * SYNODIC_MONTH_DAYS
    }

    /// Qualitative illumination descriptor for the current percentage.
    pub fn illumination_band(&self) -> IlluminationBand {
        IlluminationBand::for_percent(self.illumination_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MoonObservation {
        MoonObservation {
            timestamp: "2024-01-25T18:00:00".parse().unwrap(),
            cycle_position: 0.5,
            moon_age_days: 14.25,
            illumination_percent: 100.0,
            phase: Phase::Full,
            earth_to_moon_au: 0.00269,
            earth_to_moon_km: 402_418.0,
            earth_to_moon_miles: 250_051.0,
            previous_new_moon: "2024-01-11T11:57:00".parse().unwrap(),
            next_new_moon: "2024-02-09T22:59:00".parse().unwrap(),
        }
    }

    #[test]
    fn test_synodic_age_tracks_cycle_position() {
        let obs = sample();
        assert!((obs.synodic_age_days() - 14.765294).abs() < 1e-5);
    }

    #[test]
    fn test_full_illumination_band() {
        assert_eq!(sample().illumination_band(), IlluminationBand::FullyIlluminated);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialized_form() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["phase"], "Full Moon");
        assert_eq!(json["timestamp"], "2024-01-25T18:00:00.000");
        assert_eq!(json["illumination_percent"], 100.0);
    }
}

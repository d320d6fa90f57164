//! Drives an ephemeris provider and normalizes its output.

use crate::classifier::Phase;
use crate::distance::{au_to_km, au_to_miles};
use crate::observation::MoonObservation;
use lunar_core::{Location, LunarError, LunarResult, UTC};
use lunar_ephemeris::{EphemerisProvider, LunarState};

/// Computes [`MoonObservation`]s from raw provider output.
///
/// Stateless apart from the provider it owns; `compute` is a pure
/// function of its inputs and the provider's (deterministic) answer, so
/// concurrent calls are independent and results may be memoized by
/// callers. Nothing is cached here.
#[derive(Debug, Clone)]
pub struct MoonPhaseCalculator<P> {
    provider: P,
}

impl<P: EphemerisProvider> MoonPhaseCalculator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Computes the observation for `timestamp`, or for the current
    /// system time when `None`.
    ///
    /// # Errors
    ///
    /// - `InvalidDate` / `InvalidLocation` surface from the inputs
    ///   (a `Location` is validated at construction; a provider may
    ///   reject coordinates it cannot serve).
    /// - `EphemerisUnavailable` when the provider fails or returns
    ///   inconsistent data: a non-increasing new-moon bracket, an
    ///   illuminated fraction outside [0, 1], or a non-positive
    ///   distance. No retry, no degraded result.
    pub fn compute(
        &self,
        timestamp: Option<UTC>,
        observer: Option<&Location>,
    ) -> LunarResult<MoonObservation> {
        let at = timestamp.unwrap_or_else(UTC::now);
        let state = self.provider.lunar_state(&at, observer)?;
        let state = validated(state, &at)?;

        let cycle_length = state.next_new_moon.days_since(&state.previous_new_moon);
        let moon_age_days = at.days_since(&state.previous_new_moon);

        // Reduce modulo 1 so floating-point overshoot at the cycle
        // boundary wraps to the next cycle instead of reading as ≥ 1.
        let cycle_position = (moon_age_days / cycle_length).rem_euclid(1.0);

        let au = state.distance_au;
        Ok(MoonObservation {
            timestamp: at,
            cycle_position,
            moon_age_days,
            illumination_percent: state.illuminated_fraction * 100.0,
            phase: Phase::for_cycle_position(cycle_position),
            earth_to_moon_au: au,
            earth_to_moon_km: au_to_km(au),
            earth_to_moon_miles: au_to_miles(au),
            previous_new_moon: state.previous_new_moon,
            next_new_moon: state.next_new_moon,
        })
    }
}

/// Rejects provider output the phase math cannot trust.
fn validated(state: LunarState, at: &UTC) -> LunarResult<LunarState> {
    let cycle_length = state.next_new_moon.days_since(&state.previous_new_moon);
    if !cycle_length.is_finite() || cycle_length <= 0.0 {
        return Err(LunarError::ephemeris_unavailable(format!(
            "new-moon bracket is not increasing: {} .. {}",
            state.previous_new_moon, state.next_new_moon
        )));
    }
    if at.days_since(&state.previous_new_moon) < 0.0 {
        return Err(LunarError::ephemeris_unavailable(format!(
            "previous new moon {} is after the requested instant {at}",
            state.previous_new_moon
        )));
    }
    if !(0.0..=1.0).contains(&state.illuminated_fraction) {
        return Err(LunarError::ephemeris_unavailable(format!(
            "illuminated fraction outside [0, 1]: {}",
            state.illuminated_fraction
        )));
    }
    if !state.distance_au.is_finite() || state.distance_au <= 0.0 {
        return Err(LunarError::ephemeris_unavailable(format!(
            "non-physical Earth-Moon distance: {} AU",
            state.distance_au
        )));
    }
    Ok(state)
}

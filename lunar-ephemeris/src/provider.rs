use lunar_core::{Location, LunarResult, UTC};

/// Raw lunar quantities for one instant, as supplied by a backend.
#[derive(Debug, Clone, Copy)]
pub struct LunarState {
    /// Fraction of the visible disk that is lit, in [0, 1].
    pub illuminated_fraction: f64,
    /// Geocentric Earth-Moon distance in astronomical units.
    pub distance_au: f64,
    /// Instant of the new moon at or before the queried instant.
    pub previous_new_moon: UTC,
    /// Instant of the first new moon after the queried instant.
    pub next_new_moon: UTC,
}

/// A source of raw lunar ephemerides.
///
/// Implementations must be usable through `&self` from concurrent callers:
/// per-call intermediates stay on the stack, nothing is cached between
/// calls. The observer, when given, may refine topocentric quantities a
/// backend chooses to offer; the geocentric fields of [`LunarState`] do
/// not depend on it.
pub trait EphemerisProvider {
    fn lunar_state(&self, at: &UTC, observer: Option<&Location>) -> LunarResult<LunarState>;
}

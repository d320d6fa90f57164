//! New- and full-moon instants.
//!
//! Instants come from the mean-lunation polynomial plus the periodic and
//! planetary correction series of Meeus, *Astronomical Algorithms* ch. 49,
//! accurate to a couple of minutes over several centuries around J2000.
//! The series yields terrestrial time; the ΔT offset to UTC (about a
//! minute in the current era) is below that accuracy and is ignored.

use lunar_core::constants::DEG_TO_RAD;
use lunar_core::{JulianDate, LunarError, LunarResult, UTC};

/// Mean lunation length seeding the bracket search, days.
const MEAN_LUNATION_DAYS: f64 = 29.530588861;

/// JDE of the mean new moon of lunation k = 0 (2000 January 6).
const LUNATION_EPOCH_JDE: f64 = 2_451_550.09766;

/// How many candidate lunations the bracket search may probe before it
/// gives up. The mean polynomial is within hours of the truth, so two
/// candidates on either side already carry slack.
const SEARCH_SPAN: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PhaseEvent {
    NewMoon,
    FullMoon,
}

/// One periodic correction: `coeff × E^e_pow × sin(m·M + mp·M' + f·F + om·Ω)`,
/// in days. New and full moons share arguments but not all coefficients.
struct CorrectionTerm {
    new_moon: f64,
    full_moon: f64,
    e_pow: u8,
    m: i8,
    mp: i8,
    f: i8,
    om: i8,
}

#[rustfmt::skip]
const CORRECTION_TERMS: [CorrectionTerm; 25] = [
    CorrectionTerm { new_moon: -0.40720, full_moon: -0.40614, e_pow: 0, m: 0, mp: 1, f: 0, om: 0 },
    CorrectionTerm { new_moon: 0.17241, full_moon: 0.17302, e_pow: 1, m: 1, mp: 0, f: 0, om: 0 },
    CorrectionTerm { new_moon: 0.01608, full_moon: 0.01614, e_pow: 0, m: 0, mp: 2, f: 0, om: 0 },
    CorrectionTerm { new_moon: 0.01039, full_moon: 0.01043, e_pow: 0, m: 0, mp: 0, f: 2, om: 0 },
    CorrectionTerm { new_moon: 0.00739, full_moon: 0.00734, e_pow: 1, m: -1, mp: 1, f: 0, om: 0 },
    CorrectionTerm { new_moon: -0.00514, full_moon: -0.00515, e_pow: 1, m: 1, mp: 1, f: 0, om: 0 },
    CorrectionTerm { new_moon: 0.00208, full_moon: 0.00209, e_pow: 2, m: 2, mp: 0, f: 0, om: 0 },
    CorrectionTerm { new_moon: -0.00111, full_moon: -0.00111, e_pow: 0, m: 0, mp: 1, f: -2, om: 0 },
    CorrectionTerm { new_moon: -0.00057, full_moon: -0.00057, e_pow: 0, m: 0, mp: 1, f: 2, om: 0 },
    CorrectionTerm { new_moon: 0.00056, full_moon: 0.00056, e_pow: 1, m: 1, mp: 2, f: 0, om: 0 },
    CorrectionTerm { new_moon: -0.00042, full_moon: -0.00042, e_pow: 0, m: 0, mp: 3, f: 0, om: 0 },
    CorrectionTerm { new_moon: 0.00042, full_moon: 0.00042, e_pow: 1, m: 1, mp: 0, f: 2, om: 0 },
    CorrectionTerm { new_moon: 0.00038, full_moon: 0.00038, e_pow: 1, m: 1, mp: 0, f: -2, om: 0 },
    CorrectionTerm { new_moon: -0.00024, full_moon: -0.00024, e_pow: 1, m: -1, mp: 2, f: 0, om: 0 },
    CorrectionTerm { new_moon: -0.00017, full_moon: -0.00017, e_pow: 0, m: 0, mp: 0, f: 0, om: 1 },
    CorrectionTerm { new_moon: -0.00007, full_moon: -0.00007, e_pow: 0, m: 2, mp: 1, f: 0, om: 0 },
    CorrectionTerm { new_moon: 0.00004, full_moon: 0.00004, e_pow: 0, m: 0, mp: 2, f: -2, om: 0 },
    CorrectionTerm { new_moon: 0.00004, full_moon: 0.00004, e_pow: 0, m: 3, mp: 0, f: 0, om: 0 },
    CorrectionTerm { new_moon: 0.00003, full_moon: 0.00003, e_pow: 0, m: 1, mp: 1, f: -2, om: 0 },
    CorrectionTerm { new_moon: 0.00003, full_moon: 0.00003, e_pow: 0, m: 0, mp: 2, f: 2, om: 0 },
    CorrectionTerm { new_moon: -0.00003, full_moon: -0.00003, e_pow: 0, m: 1, mp: 1, f: 2, om: 0 },
    CorrectionTerm { new_moon: 0.00003, full_moon: 0.00003, e_pow: 0, m: -1, mp: 1, f: 2, om: 0 },
    CorrectionTerm { new_moon: -0.00002, full_moon: -0.00002, e_pow: 0, m: -1, mp: 1, f: -2, om: 0 },
    CorrectionTerm { new_moon: -0.00002, full_moon: -0.00002, e_pow: 0, m: 1, mp: 3, f: 0, om: 0 },
    CorrectionTerm { new_moon: 0.00002, full_moon: 0.00002, e_pow: 0, m: 0, mp: 4, f: 0, om: 0 },
];

/// JDE of the lunation-`k` event. Integer `k` is a new moon, `k + 0.5`
/// the following full moon; `k = 0` falls in January 2000.
fn phase_event_jde(k: f64, event: PhaseEvent) -> f64 {
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = LUNATION_EPOCH_JDE + MEAN_LUNATION_DAYS * k + 0.00015437 * t2
        - 0.000000150 * t3
        + 0.00000000073 * t4;

    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;

    let m = (2.5534 + 29.10535670 * k - 0.0000014 * t2 - 0.00000011 * t3) * DEG_TO_RAD;
    let mp = (201.5643 + 385.81693528 * k + 0.0107582 * t2 + 0.00001238 * t3
        - 0.000000058 * t4)
        * DEG_TO_RAD;
    let f = (160.7108 + 390.67050284 * k - 0.0016118 * t2 - 0.00000227 * t3
        + 0.000000011 * t4)
        * DEG_TO_RAD;
    let omega = (124.7746 - 1.56375588 * k + 0.0020672 * t2 + 0.00000215 * t3) * DEG_TO_RAD;

    let mut correction = 0.0;
    for term in &CORRECTION_TERMS {
        let coeff = match event {
            PhaseEvent::NewMoon => term.new_moon,
            PhaseEvent::FullMoon => term.full_moon,
        };
        let scale = match term.e_pow {
            0 => 1.0,
            1 => e,
            _ => e * e,
        };
        let arg = f64::from(term.m) * m
            + f64::from(term.mp) * mp
            + f64::from(term.f) * f
            + f64::from(term.om) * omega;
        correction += coeff * scale * libm::sin(arg);
    }

    mean + correction + planetary_correction(k, t)
}

/// The fourteen additional planetary arguments, identical for every
/// phase event.
fn planetary_correction(k: f64, t: f64) -> f64 {
    let args = [
        (0.000325, 299.77 + 0.107408 * k - 0.009173 * t * t),
        (0.000165, 251.88 + 0.016321 * k),
        (0.000164, 251.83 + 26.651886 * k),
        (0.000126, 349.42 + 36.412478 * k),
        (0.000110, 84.66 + 18.206239 * k),
        (0.000062, 141.74 + 53.303771 * k),
        (0.000060, 207.14 + 2.453732 * k),
        (0.000056, 154.84 + 7.306860 * k),
        (0.000047, 34.52 + 27.261239 * k),
        (0.000042, 207.19 + 0.121824 * k),
        (0.000040, 291.34 + 1.844379 * k),
        (0.000037, 161.72 + 24.198154 * k),
        (0.000035, 239.56 + 25.513099 * k),
        (0.000023, 331.55 + 3.592518 * k),
    ];
    args.iter()
        .map(|(coeff, deg)| coeff * libm::sin(deg * DEG_TO_RAD))
        .sum()
}

fn approx_lunation(jd: f64) -> f64 {
    (jd - LUNATION_EPOCH_JDE) / MEAN_LUNATION_DAYS
}

/// Instant of the new moon at or before `at`.
pub fn previous_new_moon(at: &UTC) -> LunarResult<UTC> {
    let jd = at.to_julian_date().to_f64();
    let mut k = approx_lunation(jd).floor() + 2.0;
    for _ in 0..SEARCH_SPAN {
        let instant = phase_event_jde(k, PhaseEvent::NewMoon);
        if instant <= jd {
            return Ok(UTC::from_julian_date(JulianDate::from_f64(instant)));
        }
        k -= 1.0;
    }
    Err(LunarError::ephemeris_unavailable(
        "new-moon search failed to bracket the requested instant from above",
    ))
}

/// Instant of the first new moon after `at`.
pub fn next_new_moon(at: &UTC) -> LunarResult<UTC> {
    let jd = at.to_julian_date().to_f64();
    let mut k = approx_lunation(jd).floor() - 2.0;
    for _ in 0..SEARCH_SPAN {
        let instant = phase_event_jde(k, PhaseEvent::NewMoon);
        if instant > jd {
            return Ok(UTC::from_julian_date(JulianDate::from_f64(instant)));
        }
        k += 1.0;
    }
    Err(LunarError::ephemeris_unavailable(
        "new-moon search failed to bracket the requested instant from below",
    ))
}

/// Instant of the first full moon after `at`.
pub fn next_full_moon(at: &UTC) -> LunarResult<UTC> {
    let jd = at.to_julian_date().to_f64();
    let mut k = approx_lunation(jd).floor() - 2.0 + 0.5;
    for _ in 0..SEARCH_SPAN {
        let instant = phase_event_jde(k, PhaseEvent::FullMoon);
        if instant > jd {
            return Ok(UTC::from_julian_date(JulianDate::from_f64(instant)));
        }
        k += 1.0;
    }
    Err(LunarError::ephemeris_unavailable(
        "full-moon search failed to bracket the requested instant from below",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // JD of 2000-01-06 18:14 UTC, the first new moon of 2000.
    const NEW_MOON_2000_JAN: f64 = 2_451_550.259_72;
    // JD of 2000-01-21 04:40 UTC, the following full moon.
    const FULL_MOON_2000_JAN: f64 = 2_451_564.694_44;

    #[test]
    fn test_lunation_zero_new_moon() {
        let jde = phase_event_jde(0.0, PhaseEvent::NewMoon);
        assert!(
            (jde - NEW_MOON_2000_JAN).abs() < 0.01,
            "jde = {jde}, expected ~{NEW_MOON_2000_JAN}"
        );
    }

    #[test]
    fn test_lunation_zero_full_moon() {
        let jde = phase_event_jde(0.5, PhaseEvent::FullMoon);
        assert!(
            (jde - FULL_MOON_2000_JAN).abs() < 0.01,
            "jde = {jde}, expected ~{FULL_MOON_2000_JAN}"
        );
    }

    #[test]
    fn test_brackets_enclose_the_instant() {
        let at: UTC = "2024-06-05T00:00:00".parse().unwrap();
        let prev = previous_new_moon(&at).unwrap();
        let next = next_new_moon(&at).unwrap();
        assert!(prev <= at && at < next);

        let cycle = next.days_since(&prev);
        // True lunation lengths stay within about ±7 hours of the mean.
        assert!((29.1..29.95).contains(&cycle), "cycle = {cycle}");
    }

    #[test]
    fn test_instant_exactly_on_new_moon_is_its_own_previous() {
        let at: UTC = "2024-03-15T00:00:00".parse().unwrap();
        let prev = previous_new_moon(&at).unwrap();
        let again = previous_new_moon(&prev).unwrap();
        assert_eq!(prev, again);
    }

    #[test]
    fn test_full_moon_lies_mid_cycle() {
        let at: UTC = "2024-01-12T00:00:00".parse().unwrap();
        let prev = previous_new_moon(&at).unwrap();
        let next = next_new_moon(&at).unwrap();
        let full = next_full_moon(&prev.add_days(0.001)).unwrap();
        assert!(prev < full && full < next);

        let offset = full.days_since(&prev);
        assert!((13.0..16.5).contains(&offset), "offset = {offset}");
    }
}

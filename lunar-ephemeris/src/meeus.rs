//! Geocentric lunar ephemeris from truncated Meeus series.
//!
//! Longitude, latitude, and distance come from the leading periodic terms
//! of the ELP-derived tables in Meeus, *Astronomical Algorithms* ch. 47,
//! good to roughly 0.05° in longitude and a couple hundred kilometers in
//! distance. The illuminated fraction follows ch. 48: the phase angle is
//! built from the geocentric lunar position and a low-accuracy solar
//! position. New-moon brackets come from [`crate::lunation`].

use lunar_core::constants::{AU_KM, DAYS_PER_JULIAN_CENTURY, DEG_TO_RAD, J2000_JD};
use lunar_core::math::normalize_degrees;
use lunar_core::{Location, LunarResult, UTC};

use crate::lunation;
use crate::provider::{EphemerisProvider, LunarState};

/// Built-in self-contained ephemeris backend.
///
/// Stateless: a single instance serves any number of concurrent queries.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeeusEphemeris;

impl MeeusEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Fraction of the lunar disk illuminated, in [0, 1].
    pub fn illuminated_fraction(&self, at: &UTC) -> f64 {
        let t = julian_centuries(at);
        illuminated_fraction(&moon_position(t), t)
    }

    /// Geocentric Earth-Moon distance in astronomical units.
    pub fn distance_au(&self, at: &UTC) -> f64 {
        moon_position(julian_centuries(at)).distance_km / AU_KM
    }

    /// First full moon after `at`.
    ///
    /// Not part of the provider contract; offered because display layers
    /// like to show it alongside the new-moon bracket.
    pub fn next_full_moon(&self, at: &UTC) -> LunarResult<UTC> {
        lunation::next_full_moon(at)
    }
}

impl EphemerisProvider for MeeusEphemeris {
    fn lunar_state(&self, at: &UTC, observer: Option<&Location>) -> LunarResult<LunarState> {
        // All four quantities are geocentric; a validated observer cannot
        // change them, so it is accepted and set aside.
        let _ = observer;
        let t = julian_centuries(at);
        let moon = moon_position(t);
        Ok(LunarState {
            illuminated_fraction: illuminated_fraction(&moon, t),
            distance_au: moon.distance_km / AU_KM,
            previous_new_moon: lunation::previous_new_moon(at)?,
            next_new_moon: lunation::next_new_moon(at)?,
        })
    }
}

/// Julian centuries of TT from J2000.0 (the ΔT offset from UTC is below
/// the accuracy of the truncated series and is ignored).
pub(crate) fn julian_centuries(at: &UTC) -> f64 {
    let jd = at.to_julian_date();
    ((jd.jd1() - J2000_JD) + jd.jd2()) / DAYS_PER_JULIAN_CENTURY
}

#[derive(Debug, Clone, Copy)]
struct MoonPosition {
    longitude_deg: f64,
    latitude_deg: f64,
    distance_km: f64,
}

/// One row of table 47.A: argument multipliers for D, M, M', F and the
/// sine (longitude, 1e-6 deg) and cosine (distance, 1e-3 km) coefficients.
struct LonDistTerm {
    d: i8,
    m: i8,
    mp: i8,
    f: i8,
    sin_lon: f64,
    cos_dist: f64,
}

/// One row of table 47.B: argument multipliers and the sine coefficient
/// for latitude (1e-6 deg).
struct LatTerm {
    d: i8,
    m: i8,
    mp: i8,
    f: i8,
    sin_lat: f64,
}

#[rustfmt::skip]
const LON_DIST_TERMS: [LonDistTerm; 20] = [
    LonDistTerm { d: 0, m: 0, mp: 1, f: 0, sin_lon: 6_288_774.0, cos_dist: -20_905_355.0 },
    LonDistTerm { d: 2, m: 0, mp: -1, f: 0, sin_lon: 1_274_027.0, cos_dist: -3_699_111.0 },
    LonDistTerm { d: 2, m: 0, mp: 0, f: 0, sin_lon: 658_314.0, cos_dist: -2_955_968.0 },
    LonDistTerm { d: 0, m: 0, mp: 2, f: 0, sin_lon: 213_618.0, cos_dist: -569_925.0 },
    LonDistTerm { d: 0, m: 1, mp: 0, f: 0, sin_lon: -185_116.0, cos_dist: 48_888.0 },
    LonDistTerm { d: 0, m: 0, mp: 0, f: 2, sin_lon: -114_332.0, cos_dist: -3_149.0 },
    LonDistTerm { d: 2, m: 0, mp: -2, f: 0, sin_lon: 58_793.0, cos_dist: 246_158.0 },
    LonDistTerm { d: 2, m: -1, mp: -1, f: 0, sin_lon: 57_066.0, cos_dist: -152_138.0 },
    LonDistTerm { d: 2, m: 0, mp: 1, f: 0, sin_lon: 53_322.0, cos_dist: -170_733.0 },
    LonDistTerm { d: 2, m: -1, mp: 0, f: 0, sin_lon: 45_758.0, cos_dist: -204_586.0 },
    LonDistTerm { d: 0, m: 1, mp: -1, f: 0, sin_lon: -40_923.0, cos_dist: -129_620.0 },
    LonDistTerm { d: 1, m: 0, mp: 0, f: 0, sin_lon: -34_720.0, cos_dist: 108_743.0 },
    LonDistTerm { d: 0, m: 1, mp: 1, f: 0, sin_lon: -30_383.0, cos_dist: 104_755.0 },
    LonDistTerm { d: 2, m: 0, mp: 0, f: -2, sin_lon: 15_327.0, cos_dist: 10_321.0 },
    LonDistTerm { d: 0, m: 0, mp: 1, f: 2, sin_lon: -12_528.0, cos_dist: 0.0 },
    LonDistTerm { d: 0, m: 0, mp: 1, f: -2, sin_lon: 10_980.0, cos_dist: 79_661.0 },
    LonDistTerm { d: 4, m: 0, mp: -1, f: 0, sin_lon: 10_675.0, cos_dist: -34_782.0 },
    LonDistTerm { d: 0, m: 0, mp: 3, f: 0, sin_lon: 10_034.0, cos_dist: -23_210.0 },
    LonDistTerm { d: 4, m: 0, mp: -2, f: 0, sin_lon: 8_548.0, cos_dist: -21_636.0 },
    LonDistTerm { d: 2, m: 1, mp: -1, f: 0, sin_lon: -7_888.0, cos_dist: 24_208.0 },
];

#[rustfmt::skip]
const LAT_TERMS: [LatTerm; 20] = [
    LatTerm { d: 0, m: 0, mp: 0, f: 1, sin_lat: 5_128_122.0 },
    LatTerm { d: 0, m: 0, mp: 1, f: 1, sin_lat: 280_602.0 },
    LatTerm { d: 0, m: 0, mp: 1, f: -1, sin_lat: 277_693.0 },
    LatTerm { d: 2, m: 0, mp: 0, f: -1, sin_lat: 173_237.0 },
    LatTerm { d: 2, m: 0, mp: -1, f: 1, sin_lat: 55_413.0 },
    LatTerm { d: 2, m: 0, mp: -1, f: -1, sin_lat: 46_271.0 },
    LatTerm { d: 2, m: 0, mp: 0, f: 1, sin_lat: 32_573.0 },
    LatTerm { d: 0, m: 0, mp: 2, f: 1, sin_lat: 17_198.0 },
    LatTerm { d: 2, m: 0, mp: 1, f: -1, sin_lat: 9_266.0 },
    LatTerm { d: 0, m: 0, mp: 2, f: -1, sin_lat: 8_822.0 },
    LatTerm { d: 2, m: -1, mp: 0, f: -1, sin_lat: 8_216.0 },
    LatTerm { d: 2, m: 0, mp: -2, f: -1, sin_lat: 4_324.0 },
    LatTerm { d: 2, m: 0, mp: 1, f: 1, sin_lat: 4_200.0 },
    LatTerm { d: 2, m: 1, mp: 0, f: -1, sin_lat: -3_359.0 },
    LatTerm { d: 2, m: -1, mp: -1, f: 1, sin_lat: 2_463.0 },
    LatTerm { d: 2, m: -1, mp: 0, f: 1, sin_lat: 2_211.0 },
    LatTerm { d: 2, m: -1, mp: -1, f: -1, sin_lat: 2_065.0 },
    LatTerm { d: 0, m: 1, mp: -1, f: -1, sin_lat: -1_870.0 },
    LatTerm { d: 4, m: 0, mp: -1, f: -1, sin_lat: 1_828.0 },
    LatTerm { d: 0, m: 1, mp: 0, f: 1, sin_lat: -1_794.0 },
];

fn moon_mean_longitude(t: f64) -> f64 {
    normalize_degrees(
        218.3164477 + 481_267.88123421 * t - 0.0015786 * t * t + t * t * t / 538_841.0
            - t * t * t * t / 65_194_000.0,
    )
}

fn moon_mean_elongation(t: f64) -> f64 {
    normalize_degrees(
        297.8501921 + 445_267.1114034 * t - 0.0018819 * t * t + t * t * t / 545_868.0
            - t * t * t * t / 113_065_000.0,
    )
}

fn sun_mean_anomaly(t: f64) -> f64 {
    normalize_degrees(357.5291092 + 35_999.0502909 * t - 0.0001536 * t * t + t * t * t / 24_490_000.0)
}

fn moon_mean_anomaly(t: f64) -> f64 {
    normalize_degrees(
        134.9633964 + 477_198.8675055 * t + 0.0087414 * t * t + t * t * t / 69_699.0
            - t * t * t * t / 14_712_000.0,
    )
}

fn moon_argument_latitude(t: f64) -> f64 {
    normalize_degrees(
        93.2720950 + 483_202.0175233 * t - 0.0036539 * t * t - t * t * t / 3_526_000.0
            + t * t * t * t / 863_310_000.0,
    )
}

fn eccentricity_factor(e: f64, m: i8) -> f64 {
    match m.unsigned_abs() {
        0 => 1.0,
        1 => e,
        _ => e * e,
    }
}

fn moon_position(t: f64) -> MoonPosition {
    let lp = moon_mean_longitude(t);
    let d = moon_mean_elongation(t);
    let m = sun_mean_anomaly(t);
    let mp = moon_mean_anomaly(t);
    let f = moon_argument_latitude(t);
    let e = 1.0 - 0.002516 * t - 0.0000074 * t * t;

    let mut sum_lon = 0.0;
    let mut sum_dist = 0.0;
    for term in &LON_DIST_TERMS {
        let arg = (f64::from(term.d) * d
            + f64::from(term.m) * m
            + f64::from(term.mp) * mp
            + f64::from(term.f) * f)
            * DEG_TO_RAD;
        let (sin_arg, cos_arg) = libm::sincos(arg);
        let scale = eccentricity_factor(e, term.m);
        sum_lon += term.sin_lon * scale * sin_arg;
        sum_dist += term.cos_dist * scale * cos_arg;
    }

    let mut sum_lat = 0.0;
    for term in &LAT_TERMS {
        let arg = (f64::from(term.d) * d
            + f64::from(term.m) * m
            + f64::from(term.mp) * mp
            + f64::from(term.f) * f)
            * DEG_TO_RAD;
        sum_lat += term.sin_lat * eccentricity_factor(e, term.m) * libm::sin(arg);
    }

    // Venus, Jupiter, and flattening corrections (47.5/47.6).
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;

    sum_lon += 3958.0 * libm::sin(a1 * DEG_TO_RAD)
        + 1962.0 * libm::sin((lp - f) * DEG_TO_RAD)
        + 318.0 * libm::sin(a2 * DEG_TO_RAD);

    sum_lat += -2235.0 * libm::sin(lp * DEG_TO_RAD)
        + 382.0 * libm::sin(a3 * DEG_TO_RAD)
        + 175.0 * libm::sin((a1 - f) * DEG_TO_RAD)
        + 175.0 * libm::sin((a1 + f) * DEG_TO_RAD)
        + 127.0 * libm::sin((lp - mp) * DEG_TO_RAD)
        - 115.0 * libm::sin((lp + mp) * DEG_TO_RAD);

    MoonPosition {
        longitude_deg: normalize_degrees(lp + sum_lon / 1_000_000.0),
        latitude_deg: sum_lat / 1_000_000.0,
        distance_km: 385_000.56 + sum_dist / 1000.0,
    }
}

/// Apparent solar ecliptic longitude (degrees) and Sun-Earth distance
/// (AU) from the low-accuracy theory of ch. 25.
fn sun_position(t: f64) -> (f64, f64) {
    let l0 = normalize_degrees(280.46646 + t * (36_000.76983 + t * 0.0003032));
    let m_deg = normalize_degrees(357.52911 + t * (35_999.05029 - t * 0.0001537));
    let m = m_deg * DEG_TO_RAD;

    let center = (1.914602 - t * (0.004817 + t * 0.000014)) * libm::sin(m)
        + (0.019993 - 0.000101 * t) * libm::sin(2.0 * m)
        + 0.000289 * libm::sin(3.0 * m);

    let true_longitude = normalize_degrees(l0 + center);

    let e = 0.016708634 - t * (0.000042037 + t * 0.0000001267);
    let true_anomaly = (m_deg + center) * DEG_TO_RAD;
    let radius = 1.000001018 * (1.0 - e * e) / (1.0 + e * libm::cos(true_anomaly));

    (true_longitude, radius)
}

/// Illuminated fraction of the disk from the phase angle (48.1-48.3).
fn illuminated_fraction(moon: &MoonPosition, t: f64) -> f64 {
    let (sun_lon_deg, sun_dist_au) = sun_position(t);
    let sun_dist_km = sun_dist_au * AU_KM;

    let cos_elongation = (libm::cos(moon.latitude_deg * DEG_TO_RAD)
        * libm::cos((moon.longitude_deg - sun_lon_deg) * DEG_TO_RAD))
    .clamp(-1.0, 1.0);
    let elongation = libm::acos(cos_elongation);

    let phase_angle = libm::atan2(
        sun_dist_km * libm::sin(elongation),
        moon.distance_km - sun_dist_km * cos_elongation,
    );

    ((1.0 + libm::cos(phase_angle)) / 2.0).clamp(0.0, 1.0)
}

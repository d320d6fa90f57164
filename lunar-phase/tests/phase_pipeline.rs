//! End-to-end checks: calculator + built-in ephemeris over real dates.

use lunar_phase::{IlluminationBand, Location, MeeusEphemeris, MoonPhaseCalculator, Phase, UTC};

fn calculator() -> MoonPhaseCalculator<MeeusEphemeris> {
    MoonPhaseCalculator::new(MeeusEphemeris::new())
}

#[test]
fn full_moon_january_2024() {
    let at: UTC = "2024-01-25T17:54:00".parse().unwrap();
    let obs = calculator().compute(Some(at), None).unwrap();

    assert_eq!(obs.phase, Phase::Full);
    assert!((obs.cycle_position - 0.5).abs() < 0.02, "pos = {}", obs.cycle_position);
    assert!(obs.illumination_percent > 99.0);
    assert_eq!(obs.illumination_band(), IlluminationBand::FullyIlluminated);
}

#[test]
fn new_moon_january_2024() {
    let at: UTC = "2024-01-11T11:57:00".parse().unwrap();
    let obs = calculator().compute(Some(at), None).unwrap();

    assert_eq!(obs.phase, Phase::New);
    assert!(obs.moon_age_days < 0.1, "age = {}", obs.moon_age_days);
    assert!(obs.illumination_percent < 1.0);
    assert_eq!(obs.illumination_band(), IlluminationBand::VirtuallyDark);
}

#[test]
fn first_quarter_week() {
    // 2024-01-18 was the first-quarter day of that cycle.
    let at: UTC = "2024-01-18T03:53:00".parse().unwrap();
    let obs = calculator().compute(Some(at), None).unwrap();

    assert_eq!(obs.phase, Phase::FirstQuarter);
    assert!((obs.illumination_percent - 50.0).abs() < 5.0);
}

#[test]
fn waxing_and_waning_disambiguated() {
    // Similar illumination on both sides of full, different phases.
    let waxing = calculator()
        .compute(Some("2024-01-21T00:00:00".parse().unwrap()), None)
        .unwrap();
    let waning = calculator()
        .compute(Some("2024-01-30T00:00:00".parse().unwrap()), None)
        .unwrap();

    assert_eq!(waxing.phase, Phase::WaxingGibbous);
    assert_eq!(waning.phase, Phase::WaningGibbous);
    assert!(waxing.cycle_position < 0.5);
    assert!(waning.cycle_position > 0.5);
}

#[test]
fn observation_fields_are_coherent() {
    let at: UTC = "2024-06-05T00:00:00".parse().unwrap();
    let obs = calculator().compute(Some(at), None).unwrap();

    assert!((0.0..1.0).contains(&obs.cycle_position));
    assert!(obs.moon_age_days >= 0.0);
    assert!((0.0..=100.0).contains(&obs.illumination_percent));
    assert!(obs.previous_new_moon <= obs.timestamp);
    assert!(obs.timestamp < obs.next_new_moon);

    // The mean-month approximation stays within hours of the true age.
    assert!((obs.moon_age_days - obs.synodic_age_days()).abs() < 0.5);

    // Distance conversions agree with the AU value.
    assert!((obs.earth_to_moon_km - obs.earth_to_moon_au * 149_597_870.7).abs() < 1e-6);
    assert!((obs.earth_to_moon_miles - obs.earth_to_moon_au * 92_955_807.273).abs() < 1e-6);
}

#[test]
fn age_resets_across_a_new_moon() {
    let before: UTC = "2024-02-09T22:00:00".parse().unwrap();
    let after: UTC = "2024-02-10T00:00:00".parse().unwrap();

    let last = calculator().compute(Some(before), None).unwrap();
    let fresh = calculator().compute(Some(after), None).unwrap();

    // NASA: new moon 2024-02-09 22:59 UTC.
    assert!(last.moon_age_days > 29.0);
    assert!(fresh.moon_age_days < 0.1);
    assert_eq!(fresh.phase, Phase::New);
}

#[test]
fn observer_location_does_not_change_the_phase() {
    let at: UTC = "2024-03-25T12:00:00".parse().unwrap();
    let observer = Location::from_degrees(41.862302, -103.6627088).unwrap();

    let without = calculator().compute(Some(at), None).unwrap();
    let with = calculator().compute(Some(at), Some(&observer)).unwrap();

    assert_eq!(without, with);
}

#[test]
fn default_timestamp_is_accepted() {
    // `None` means "now"; only shape can be asserted, not values.
    let obs = calculator().compute(None, None).unwrap();
    assert!((0.0..1.0).contains(&obs.cycle_position));
    assert!((0.0..=100.0).contains(&obs.illumination_percent));
}

#[test]
fn next_full_moon_supplement() {
    let calc = calculator();
    let at: UTC = "2024-01-12T00:00:00".parse().unwrap();
    let full = calc.provider().next_full_moon(&at).unwrap();

    let expected: UTC = "2024-01-25T17:54:00".parse().unwrap();
    assert!(full.days_since(&expected).abs() * 24.0 < 2.0);
}

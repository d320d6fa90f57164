use lunar_phase::{MeeusEphemeris, MoonPhaseCalculator, UTC};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calculator = MoonPhaseCalculator::new(MeeusEphemeris::new());

    println!("=== One synodic month, week by week ===\n");

    let start: UTC = "2024-01-11T12:00:00".parse()?;
    for week in 0..5 {
        let at = start.add_days(f64::from(week) * 7.0);
        let obs = calculator.compute(Some(at), None)?;

        println!("{}:", at.to_iso8601_date());
        println!("  {}", obs.phase.description());
        println!(
            "  cycle position {:.4}, age {:.2} days",
            obs.cycle_position, obs.moon_age_days
        );
        println!(
            "  illumination {:.2}% ({})",
            obs.illumination_percent,
            obs.illumination_band()
        );
        println!(
            "  distance {:.6} AU = {:.0} km = {:.0} miles\n",
            obs.earth_to_moon_au, obs.earth_to_moon_km, obs.earth_to_moon_miles
        );
    }

    // The current cycle's bracketing new moons come with every result.
    let now_obs = calculator.compute(None, None)?;
    println!(
        "Current cycle: {} .. {}",
        now_obs.previous_new_moon.to_iso8601_date(),
        now_obs.next_new_moon.to_iso8601_date()
    );

    Ok(())
}

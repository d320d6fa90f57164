use clap::{Parser, ValueEnum};
use lunar_core::{Location, UTC};
use lunar_ephemeris::MeeusEphemeris;
use lunar_phase::{MoonObservation, MoonPhaseCalculator};

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "lunar")]
#[command(about = "Report the Moon's phase, age, illumination, and distance")]
#[command(version)]
struct Cli {
    /// Date to evaluate: YYYY-MM-DD (noon UTC) or YYYY-MM-DDTHH:MM:SS.
    /// Defaults to the current time.
    date: Option<String>,

    /// Observer latitude in degrees north
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees east
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let timestamp = match &cli.date {
        Some(text) => Some(text.parse::<UTC>()?),
        None => None,
    };
    let observer = match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => Some(Location::from_degrees(lat, lng)?),
        _ => None,
    };

    let calculator = MoonPhaseCalculator::new(MeeusEphemeris::new());
    let observation = calculator.compute(timestamp, observer.as_ref())?;

    match cli.format {
        OutputFormat::Text => print_report(&observation),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&observation)?),
    }

    Ok(())
}

fn print_report(obs: &MoonObservation) {
    println!("Date: {}", obs.timestamp.to_iso8601_date());
    println!("Moon Phase (Numeric): {:.4}", obs.cycle_position);
    println!("Moon Phase (Name): {}", obs.phase);
    println!("{}", obs.phase.description());
    println!("Moon Illumination: {:.2}%", obs.illumination_percent);
    println!("Illumination Description: {}", obs.illumination_band());
    println!("Moon Age: {:.2} days", obs.moon_age_days);
    println!("Next New Moon: {}", obs.next_new_moon.to_iso8601_date());
    println!();
    println!("Distance from Earth to Moon");
    println!("    AU: {:.6}", obs.earth_to_moon_au);
    println!("    KM: {}", group_thousands(obs.earth_to_moon_km));
    println!(" Miles: {}", group_thousands(obs.earth_to_moon_miles));
}

/// Rounds to a whole number and inserts thousands separators, matching
/// the `{:,.0f}` rendering the report has always used.
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

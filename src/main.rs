use clap::Parser;
use solarcast::{LatLon, Solarcast, SolarcastError};
use std::error::Error as _;

/// Estimate solar energy potential at a coordinate and rank candidate regions.
#[derive(Parser)]
#[command(name = "solarcast", version, about)]
struct Cli {
    /// Latitude in decimal degrees, -90 to 90.
    #[arg(allow_negative_numbers = true)]
    latitude: f64,
    /// Longitude in decimal degrees, -180 to 180.
    #[arg(allow_negative_numbers = true)]
    longitude: f64,
}

#[tokio::main]
async fn main() {
    // Set RUST_LOG=info (or debug) to see fetch and fallback messages.
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), SolarcastError> {
    let client = Solarcast::new().await?;
    let outcome = client
        .survey()
        .coordinate(LatLon(cli.latitude, cli.longitude))
        .call()
        .await?;

    let query = &outcome.query;
    println!(
        "Solar potential for {} ({:.4}, {:.4})",
        query.place.display_name(),
        query.place.coordinate.latitude(),
        query.place.coordinate.longitude()
    );
    println!(
        "  temperature {:.1} °C | cloud cover {:.1}%",
        query.temperature_c, query.cloud_cover_pct
    );
    println!(
        "  intensity {:.2} W/m² | daylight {:.2} h | energy {:.3} kWh/m²",
        query.intensity_w_m2, query.daylight_hours, query.energy_kwh_m2
    );

    println!();
    println!("Top regions by estimated energy:");
    for (i, entry) in outcome.report.entries.iter().enumerate() {
        println!(
            "{:>2}. {:<12} {:>7.3} kWh/m²  ({:.1}% cloud, {:.2} h daylight)",
            i + 1,
            entry.place.display_name(),
            entry.energy_kwh_m2,
            entry.cloud_cover_pct,
            entry.daylight_hours
        );
    }

    println!();
    println!("Report written to {}", outcome.report_csv.display());
    println!("Query logged to {}", outcome.query_log_csv.display());
    if let Some(chart) = &outcome.chart_html {
        println!("Chart written to {}", chart.display());
    }
    Ok(())
}

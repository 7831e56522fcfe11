//! demos/survey_live.rs
//!
//! Runs a full live survey for central Delhi: fetches weather from
//! Open-Meteo for the query point and every built-in region, ranks them,
//! and writes the CSV report plus the interactive chart.
//!
//! To run: cargo run --example survey_live

use solarcast::{LatLon, Solarcast};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=info to watch the fetches happen.
    env_logger::init();

    let client = Solarcast::new().await?;
    let outcome = client
        .survey()
        .coordinate(LatLon(28.6139, 77.2090))
        .call()
        .await?;

    println!(
        "{}: {:.3} kWh/m² ({:.1}% cloud, {:.1} °C)",
        outcome.query.place.display_name(),
        outcome.query.energy_kwh_m2,
        outcome.query.cloud_cover_pct,
        outcome.query.temperature_c,
    );
    println!("Top region: {}", outcome.report.entries[0].place.display_name());
    println!("Report written to {}", outcome.report_csv.display());
    if let Some(chart) = &outcome.chart_html {
        println!("Open {} in a browser for the chart.", chart.display());
    }
    Ok(())
}

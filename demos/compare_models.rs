//! Model comparison example: run the comparison set over noisy trending
//! history and print the candidates ranked by MAPE.

use chrono::{Duration, TimeZone, Utc};
use market_forecast::sample::SampleSeries;
use market_forecast::selection::best_forecast;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), market_forecast::ForecastError> {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    let generator = SampleSeries {
        base: 5000.0,
        trend: 35.0,
        seasonal_amplitude: 250.0,
        seasonal_period: 7,
        noise: 80.0,
    };
    let history = generator.generate(60, start, Duration::days(1), &mut rng)?;

    let comparison = best_forecast(&history, 6, 0.95)?;

    println!("Candidates ranked by MAPE:");
    for candidate in &comparison.candidates {
        println!(
            "  {:<28} RMSE {:>8.2}  MAPE {:>6.2}%",
            candidate.model_name, candidate.rmse, candidate.mape
        );
    }

    println!();
    println!("Best model: {}", comparison.best.model_name);
    for point in &comparison.best.forecast {
        println!("  {}  {:.1}", point.timestamp.format("%Y-%m-%d"), point.value);
    }

    Ok(())
}

//! Basic forecasting example: generate a year of synthetic monthly history
//! and forecast the next six periods with a single model.

use chrono::{Duration, TimeZone, Utc};
use market_forecast::models::linear_regression::LinearRegression;
use market_forecast::models::ForecastModel;
use market_forecast::sample::SampleSeries;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), market_forecast::ForecastError> {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let history = SampleSeries::default().generate(24, start, Duration::days(30), &mut rng)?;

    let model = LinearRegression::new(0.95)?;
    let result = model.forecast(&history, 6)?;

    println!("Model: {}", result.model_name);
    println!("In-sample RMSE: {:.2}, MAPE: {:.2}%", result.rmse, result.mape);
    println!();
    println!("{:<12} {:>10} {:>10} {:>10}", "date", "lower", "forecast", "upper");
    for i in 0..result.forecast.len() {
        println!(
            "{:<12} {:>10.1} {:>10.1} {:>10.1}",
            result.forecast[i].timestamp.format("%Y-%m-%d"),
            result.lower_bound[i].value,
            result.forecast[i].value,
            result.upper_bound[i].value,
        );
    }

    Ok(())
}

use chrono::{Duration, TimeZone, Utc};
use market_forecast::models::arima::Arima;
use market_forecast::models::holt_winters::HoltWinters;
use market_forecast::models::linear_regression::LinearRegression;
use market_forecast::models::moving_average::MovingAverage;
use market_forecast::models::ForecastModel;
use market_forecast::sample::SampleSeries;
use market_forecast::selection::best_forecast;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sample_history(seed: u64, len: usize) -> market_forecast::TimeSeries {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);

    SampleSeries::default()
        .generate(len, start, Duration::days(1), &mut rng)
        .unwrap()
}

#[test]
fn test_sample_generator_is_reproducible() {
    let first = sample_history(42, 30);
    let second = sample_history(42, 30);
    assert_eq!(first, second);

    let different_seed = sample_history(7, 30);
    assert_ne!(first.values(), different_seed.values());
}

#[test]
fn test_sample_generator_produces_usable_series() {
    let history = sample_history(42, 60);

    assert_eq!(history.len(), 60);
    for point in history.points() {
        assert!(point.value >= 0.0);
        assert!(point.value.is_finite());
    }
    assert_eq!(history.average_interval(), Duration::days(1));
}

#[test]
fn test_every_model_forecasts_generated_history() {
    let history = sample_history(1234, 40);

    let models: Vec<Box<dyn ForecastModel>> = vec![
        Box::new(MovingAverage::new(3, 0.95).unwrap()),
        Box::new(Arima::new(1, 1, 1, 0.95).unwrap()),
        Box::new(HoltWinters::new()),
        Box::new(LinearRegression::new(0.95).unwrap()),
    ];

    for model in models {
        let result = model.forecast(&history, 6).unwrap();

        assert_eq!(result.horizon(), 6, "{}", model.name());
        assert!(result.rmse >= 0.0);
        assert!(result.mape >= 0.0);
        for point in &result.forecast {
            assert!(point.value.is_finite(), "{}", model.name());
            assert!(point.value >= 0.0, "{}", model.name());
        }
    }
}

#[test]
fn test_selection_over_generated_history_round_trips_to_json() {
    let history = sample_history(99, 50);
    let comparison = best_forecast(&history, 6, 0.95).unwrap();

    assert!(!comparison.candidates.is_empty());

    let json = comparison.best.to_json().unwrap();
    let parsed: market_forecast::ForecastResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.model_name, comparison.best.model_name);
    assert_eq!(parsed.forecast.len(), comparison.best.forecast.len());
}

use assert_approx_eq::assert_approx_eq;
use chrono::{Duration, TimeZone, Utc};
use market_forecast::data::TimeSeries;
use market_forecast::error::ForecastError;
use market_forecast::models::arima::Arima;
use market_forecast::models::holt_winters::HoltWinters;
use market_forecast::models::linear_regression::LinearRegression;
use market_forecast::models::moving_average::MovingAverage;
use market_forecast::models::{ForecastModel, ForecastResult};
use market_forecast::TimeSeriesPoint;

fn daily_series(values: &[f64]) -> TimeSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    TimeSeries::from_values(start, Duration::days(1), values).unwrap()
}

/// Perfectly linear series: 100, 110, ..., 190
fn linear_series() -> TimeSeries {
    let values: Vec<f64> = (0..10).map(|i| 100.0 + 10.0 * i as f64).collect();
    daily_series(&values)
}

fn all_models() -> Vec<Box<dyn ForecastModel>> {
    vec![
        Box::new(MovingAverage::new(3, 0.95).unwrap()),
        Box::new(Arima::new(1, 1, 1, 0.95).unwrap()),
        Box::new(HoltWinters::new()),
        Box::new(LinearRegression::new(0.95).unwrap()),
    ]
}

#[test]
fn test_moving_average_length_contract() {
    let model = MovingAverage::new(3, 0.95).unwrap();

    let too_short = daily_series(&[1.0, 2.0]);
    match model.forecast(&too_short, 2) {
        Err(ForecastError::InsufficientData { required, actual }) => {
            assert_eq!(required, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("Expected InsufficientData, got {:?}", other),
    }

    let exact = daily_series(&[1.0, 2.0, 3.0]);
    assert!(model.forecast(&exact, 2).is_ok());
}

#[test]
fn test_arima_length_contract() {
    let model = Arima::new(1, 1, 1, 0.95).unwrap();

    let values: Vec<f64> = (0..9).map(|i| i as f64 + 1.0).collect();
    assert!(matches!(
        model.forecast(&daily_series(&values), 3),
        Err(ForecastError::InsufficientData {
            required: 10,
            actual: 9
        })
    ));

    let values: Vec<f64> = (0..10).map(|i| i as f64 + 1.0).collect();
    assert!(model.forecast(&daily_series(&values), 3).is_ok());
}

#[test]
fn test_holt_winters_length_contract() {
    let model = HoltWinters::new();

    // Daily cadence implies a seasonal period of 7, so 14 points are needed
    let values: Vec<f64> = (0..13).map(|i| 100.0 + i as f64).collect();
    assert!(matches!(
        model.forecast(&daily_series(&values), 3),
        Err(ForecastError::InsufficientData {
            required: 14,
            actual: 13
        })
    ));

    let values: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
    assert!(model.forecast(&daily_series(&values), 3).is_ok());
}

#[test]
fn test_linear_regression_length_contract() {
    let model = LinearRegression::new(0.95).unwrap();

    assert!(matches!(
        model.forecast(&daily_series(&[1.0, 2.0]), 3),
        Err(ForecastError::InsufficientData {
            required: 3,
            actual: 2
        })
    ));

    assert!(model.forecast(&daily_series(&[1.0, 2.0, 3.0]), 3).is_ok());
}

#[test]
fn test_forecast_shape_contracts_hold_for_every_model() {
    let values: Vec<f64> = (0..20).map(|i| 500.0 + 12.0 * i as f64).collect();
    let data = daily_series(&values);
    let last_historical = data.last().unwrap().timestamp;

    for model in all_models() {
        let result = model.forecast(&data, 6).unwrap();

        // Horizon correctness
        assert_eq!(result.forecast.len(), 6, "{}", model.name());
        assert_eq!(result.lower_bound.len(), 6, "{}", model.name());
        assert_eq!(result.upper_bound.len(), 6, "{}", model.name());

        for i in 0..6 {
            // Bound ordering
            assert!(
                result.lower_bound[i].value <= result.forecast[i].value,
                "{} lower bound above forecast at {}",
                model.name(),
                i
            );
            assert!(
                result.forecast[i].value <= result.upper_bound[i].value,
                "{} upper bound below forecast at {}",
                model.name(),
                i
            );

            // Non-negativity of the lower band
            assert!(result.lower_bound[i].value >= 0.0, "{}", model.name());
        }

        // Timestamp cadence: strictly after history, spaced one day apart
        assert!(result.forecast[0].timestamp > last_historical);
        for pair in result.forecast.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::days(1));
        }
    }
}

#[test]
fn test_moving_average_hand_computed_first_point() {
    let result = MovingAverage::new(3, 0.95)
        .unwrap()
        .forecast(&linear_series(), 3)
        .unwrap();

    let values = result.values();
    // First forecast averages the last three actuals: (170+180+190)/3
    assert_approx_eq!(values[0], 180.0);

    // Trailing MA lags a rising trend, so every point sits below the true
    // linear continuation
    let continuation = [200.0, 210.0, 220.0];
    for (forecast, truth) in values.iter().zip(continuation.iter()) {
        assert!(forecast < truth);
    }
}

#[test]
fn test_moving_average_forecast_converges() {
    let result = MovingAverage::new(3, 0.95)
        .unwrap()
        .forecast(&linear_series(), 8)
        .unwrap();

    let values = result.values();
    let last_step = (values[7] - values[6]).abs();
    let first_step = (values[1] - values[0]).abs();
    assert!(last_step < 0.5, "forecast should stabilize, step {}", last_step);
    assert!(last_step < first_step);
}

#[test]
fn test_moving_average_flat_series_is_constant() {
    let result = MovingAverage::new(3, 0.95)
        .unwrap()
        .forecast(&daily_series(&[50.0; 10]), 6)
        .unwrap();

    for value in result.values() {
        assert_approx_eq!(value, 50.0);
    }
}

#[test]
fn test_linear_regression_end_to_end_on_linear_data() {
    let result = LinearRegression::new(0.95)
        .unwrap()
        .forecast(&linear_series(), 3)
        .unwrap();

    let values = result.values();
    assert_approx_eq!(values[0], 200.0, 1e-6);
    assert_approx_eq!(values[1], 210.0, 1e-6);
    assert_approx_eq!(values[2], 220.0, 1e-6);

    assert_approx_eq!(result.rmse, 0.0, 1e-9);
    assert_approx_eq!(result.mape, 0.0, 1e-9);

    // Perfect fit collapses the confidence band onto the forecast
    assert_approx_eq!(result.lower_bound[0].value, 200.0, 1e-6);
    assert_approx_eq!(result.upper_bound[0].value, 200.0, 1e-6);
}

#[test]
fn test_linear_regression_clamps_negative_forecasts() {
    let values = [100.0, 80.0, 60.0, 40.0, 20.0, 10.0, 5.0, 2.0, 1.0, 0.0];
    let result = LinearRegression::new(0.95)
        .unwrap()
        .forecast(&daily_series(&values), 6)
        .unwrap();

    for point in &result.forecast {
        assert!(point.value >= 0.0);
    }
    for point in &result.lower_bound {
        assert!(point.value >= 0.0);
    }
}

#[test]
fn test_arima_continues_a_linear_trend() {
    let result = Arima::new(1, 1, 1, 0.95)
        .unwrap()
        .forecast(&linear_series(), 3)
        .unwrap();

    // A constant-difference series forecasts as an exact trend continuation
    let values = result.values();
    assert_approx_eq!(values[0], 200.0, 1e-6);
    assert_approx_eq!(values[1], 210.0, 1e-6);
    assert_approx_eq!(values[2], 220.0, 1e-6);
}

#[test]
fn test_arima_bounded_band_growth() {
    let values: Vec<f64> = (0..30)
        .map(|i| 100.0 + 3.0 * i as f64 + ((i * 7) % 5) as f64)
        .collect();
    let result = Arima::new(1, 1, 1, 0.95)
        .unwrap()
        .forecast(&daily_series(&values), 6)
        .unwrap();

    // Residual-based band has a fixed half-width across the horizon
    let first_width = result.upper_bound[0].value - result.lower_bound[0].value;
    let last_width = result.upper_bound[5].value - result.lower_bound[5].value;
    assert!(first_width.is_finite());
    assert!(last_width <= first_width + 1e-9);
}

#[test]
fn test_holt_winters_preserves_seasonality() {
    use std::f64::consts::TAU;

    let values: Vec<f64> = (0..28)
        .map(|i| 100.0 + 20.0 * (TAU * (i % 7) as f64 / 7.0).sin())
        .collect();
    let result = HoltWinters::new()
        .forecast(&daily_series(&values), 7)
        .unwrap();

    let forecast = result.values();
    let max = forecast.iter().cloned().fold(f64::MIN, f64::max);
    let min = forecast.iter().cloned().fold(f64::MAX, f64::min);

    // The seasonal swing survives into the forecast
    assert!(max - min > 10.0, "seasonal amplitude lost: {} .. {}", min, max);
    for value in &forecast {
        assert!(*value >= 0.0);
    }
}

#[test]
fn test_model_parameter_validation() {
    assert!(MovingAverage::new(0, 0.95).is_err());
    assert!(MovingAverage::new(3, 0.0).is_err());
    assert!(MovingAverage::new(3, 1.0).is_err());

    assert!(Arima::new(0, 1, 1, 0.95).is_err());
    assert!(Arima::new(1, 3, 1, 0.95).is_err());
    assert!(Arima::new(1, 1, 11, 0.95).is_err());
    assert!(Arima::new(1, 1, 1, 1.5).is_err());

    assert!(LinearRegression::new(-0.1).is_err());
}

#[test]
fn test_model_names() {
    assert_eq!(
        MovingAverage::new(3, 0.95).unwrap().name(),
        "Moving Average (window=3)"
    );
    assert_eq!(Arima::new(2, 1, 1, 0.95).unwrap().name(), "ARIMA(2,1,1)");
    assert_eq!(HoltWinters::new().name(), "Holt-Winters");
    assert_eq!(LinearRegression::new(0.95).unwrap().name(), "Linear Regression");
}

#[test]
fn test_forecast_result_validation_and_json() {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let point = |value: f64| TimeSeriesPoint::new(start, value);

    let result = ForecastResult::new(
        "Test",
        vec![point(10.0)],
        vec![point(8.0)],
        vec![point(12.0)],
        1.0,
        2.0,
    )
    .unwrap();

    let json = result.to_json().unwrap();
    assert!(json.contains("\"model_name\":\"Test\""));

    // Mismatched bound lengths are rejected
    assert!(ForecastResult::new(
        "Test",
        vec![point(10.0)],
        vec![],
        vec![point(12.0)],
        1.0,
        2.0,
    )
    .is_err());

    // Inverted bounds are rejected
    assert!(ForecastResult::new(
        "Test",
        vec![point(10.0)],
        vec![point(11.0)],
        vec![point(12.0)],
        1.0,
        2.0,
    )
    .is_err());
}

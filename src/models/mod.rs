//! Forecasting models for time series data

use crate::data::{TimeSeries, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod arima;
pub mod holt_winters;
pub mod linear_regression;
pub mod moving_average;

/// Forecast produced by a single model run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Point forecasts for future periods
    pub forecast: Vec<TimeSeriesPoint>,
    /// Lower confidence bounds, clamped to be non-negative
    pub lower_bound: Vec<TimeSeriesPoint>,
    /// Upper confidence bounds
    pub upper_bound: Vec<TimeSeriesPoint>,
    /// Name of the model that produced the forecast
    pub model_name: String,
    /// Root mean square error of the in-sample fit
    pub rmse: f64,
    /// Mean absolute percentage error of the in-sample fit
    pub mape: f64,
}

impl ForecastResult {
    /// Create a forecast result from explicit bound sequences.
    ///
    /// All three sequences must have the same length and satisfy
    /// `lower <= forecast <= upper` at every index.
    pub fn new(
        model_name: impl Into<String>,
        forecast: Vec<TimeSeriesPoint>,
        lower_bound: Vec<TimeSeriesPoint>,
        upper_bound: Vec<TimeSeriesPoint>,
        rmse: f64,
        mape: f64,
    ) -> Result<Self> {
        if lower_bound.len() != forecast.len() || upper_bound.len() != forecast.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: forecast.len(),
                actual: lower_bound.len().min(upper_bound.len()),
            });
        }

        for i in 0..forecast.len() {
            if lower_bound[i].value > forecast[i].value || forecast[i].value > upper_bound[i].value
            {
                return Err(ForecastError::DataError(format!(
                    "Confidence bounds are not ordered at index {}",
                    i
                )));
            }
        }

        Ok(Self {
            forecast,
            lower_bound,
            upper_bound,
            model_name: model_name.into(),
            rmse,
            mape,
        })
    }

    /// Build a result from point forecasts and a constant band half-width.
    ///
    /// Forecast values and lower bounds are clamped to be non-negative.
    pub(crate) fn with_margin(
        model_name: impl Into<String>,
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<f64>,
        margin: f64,
        rmse: f64,
        mape: f64,
    ) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                actual: values.len(),
            });
        }

        let mut forecast = Vec::with_capacity(values.len());
        let mut lower_bound = Vec::with_capacity(values.len());
        let mut upper_bound = Vec::with_capacity(values.len());

        for (stamp, raw) in timestamps.into_iter().zip(values) {
            let value = raw.max(0.0);
            forecast.push(TimeSeriesPoint::new(stamp, value));
            lower_bound.push(TimeSeriesPoint::new(stamp, (value - margin).max(0.0)));
            upper_bound.push(TimeSeriesPoint::new(stamp, value + margin));
        }

        Self::new(model_name, forecast, lower_bound, upper_bound, rmse, mape)
    }

    /// Number of forecast periods
    pub fn horizon(&self) -> usize {
        self.forecast.len()
    }

    /// Point forecast values in order
    pub fn values(&self) -> Vec<f64> {
        self.forecast.iter().map(|p| p.value).collect()
    }

    /// Serialize the result to a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ForecastError::DataError(format!("JSON serialization failed: {}", e)))
    }
}

/// A forecasting model that maps a historical series to a forecast.
///
/// Each call is a pure function of the series and the model parameters;
/// no state is retained between calls.
pub trait ForecastModel: Debug {
    /// Minimum number of observations the model requires
    fn min_observations(&self) -> usize;

    /// Forecast `horizon` future periods from the given series
    fn forecast(&self, data: &TimeSeries, horizon: usize) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Outcome of a coefficient-estimation step.
///
/// Numerically degenerate fits degrade to documented default coefficients
/// instead of failing, and the degradation is visible to callers and tests.
#[derive(Debug, Clone, PartialEq)]
pub enum CoefficientEstimate {
    /// Coefficients estimated from the data
    Estimated(Vec<f64>),
    /// Conservative defaults substituted after a degenerate fit
    Fallback(Vec<f64>),
}

impl CoefficientEstimate {
    /// The coefficients, whichever way they were obtained
    pub fn coefficients(&self) -> &[f64] {
        match self {
            CoefficientEstimate::Estimated(c) | CoefficientEstimate::Fallback(c) => c,
        }
    }

    /// Whether the estimation fell back to defaults
    pub fn is_fallback(&self) -> bool {
        matches!(self, CoefficientEstimate::Fallback(_))
    }
}

/// Check a series against a model's minimum length requirement
pub(crate) fn require_observations(data: &TimeSeries, required: usize) -> Result<()> {
    if data.len() < required {
        return Err(ForecastError::InsufficientData {
            required,
            actual: data.len(),
        });
    }
    Ok(())
}

//! Moving average model for time series forecasting

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::metrics;
use crate::models::{require_observations, ForecastModel, ForecastResult};

/// Trailing moving average model.
///
/// Future periods are forecast recursively: the first forecast averages the
/// last `window` actual values, and every later forecast averages the last
/// `window` values of the rolling forecast sequence itself. On trending data
/// the forecast therefore flattens toward a stable value.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
    /// Confidence level for the forecast bands
    confidence: f64,
}

impl MovingAverage {
    /// Create a new moving average model
    pub fn new(window: usize, confidence: f64) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }
        if confidence <= 0.0 || confidence >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Moving Average (window={})", window),
            window,
            confidence,
        })
    }

    /// Trailing in-sample fit: the moving average over the `window` values
    /// preceding each position from `window` onward
    fn fitted(&self, values: &[f64]) -> Vec<f64> {
        (self.window..values.len())
            .map(|i| values[i - self.window..i].iter().sum::<f64>() / self.window as f64)
            .collect()
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            name: "Moving Average (window=3)".to_string(),
            window: 3,
            confidence: 0.95,
        }
    }
}

impl ForecastModel for MovingAverage {
    fn min_observations(&self) -> usize {
        self.window
    }

    fn forecast(&self, data: &TimeSeries, horizon: usize) -> Result<ForecastResult> {
        require_observations(data, self.window)?;

        let values = data.values();
        let fitted = self.fitted(&values);
        let actual_tail = &values[self.window..];

        let (fit_rmse, fit_mape, residual_std) = if fitted.is_empty() {
            // Series exactly as long as the window: no overlap to score
            (0.0, 0.0, 0.0)
        } else {
            let residuals: Vec<f64> = actual_tail
                .iter()
                .zip(fitted.iter())
                .map(|(a, f)| a - f)
                .collect();
            (
                metrics::rmse(actual_tail, &fitted)?,
                metrics::mape(actual_tail, &fitted)?,
                metrics::std_dev(&residuals),
            )
        };

        let margin = metrics::z_score(self.confidence)? * residual_std;

        // Recursive forecast over a rolling window that starts as the last
        // actual values and fills up with forecasts
        let mut window_values = values[values.len() - self.window..].to_vec();
        let mut forecasts = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let next = window_values.iter().sum::<f64>() / self.window as f64;
            window_values.remove(0);
            window_values.push(next);
            forecasts.push(next);
        }

        ForecastResult::with_margin(
            self.name.clone(),
            data.future_timestamps(horizon),
            forecasts,
            margin,
            fit_rmse,
            fit_mape,
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}

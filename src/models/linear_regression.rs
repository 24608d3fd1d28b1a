//! Linear regression model for time series forecasting

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::metrics;
use crate::models::{require_observations, ForecastModel, ForecastResult};

/// Minimum observations for a meaningful trend fit
const MIN_OBSERVATIONS: usize = 3;

/// Fitted trend line, tagged with how the coefficients were obtained
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TrendLine {
    /// Ordinary least squares fit over (index, value)
    LeastSquares { intercept: f64, slope: f64 },
    /// Endpoint-slope heuristic substituted when the OLS output is malformed
    EndpointFallback { intercept: f64, slope: f64 },
}

impl TrendLine {
    fn intercept(&self) -> f64 {
        match self {
            TrendLine::LeastSquares { intercept, .. }
            | TrendLine::EndpointFallback { intercept, .. } => *intercept,
        }
    }

    fn slope(&self) -> f64 {
        match self {
            TrendLine::LeastSquares { slope, .. } | TrendLine::EndpointFallback { slope, .. } => {
                *slope
            }
        }
    }
}

/// Least-squares trend extrapolation over the observation index
#[derive(Debug, Clone)]
pub struct LinearRegression {
    /// Confidence level for the forecast bands
    confidence: f64,
}

impl LinearRegression {
    /// Create a new linear regression model
    pub fn new(confidence: f64) -> Result<Self> {
        if confidence <= 0.0 || confidence >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self { confidence })
    }

    /// Fit `value = intercept + slope * index` by ordinary least squares.
    ///
    /// Non-finite coefficients degrade to the endpoint-slope heuristic
    /// `(last - first) / (n - 1)`.
    pub(crate) fn fit_line(values: &[f64]) -> TrendLine {
        let n = values.len() as f64;
        let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values.iter().enumerate().map(|(i, v)| i as f64 * v).sum();
        let sum_xx: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();

        let denominator = n * sum_xx - sum_x * sum_x;
        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        if slope.is_finite() && intercept.is_finite() {
            TrendLine::LeastSquares { intercept, slope }
        } else {
            let slope = (values[values.len() - 1] - values[0]) / (values.len() as f64 - 1.0);
            TrendLine::EndpointFallback {
                intercept: values[0],
                slope,
            }
        }
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self { confidence: 0.95 }
    }
}

impl ForecastModel for LinearRegression {
    fn min_observations(&self) -> usize {
        MIN_OBSERVATIONS
    }

    fn forecast(&self, data: &TimeSeries, horizon: usize) -> Result<ForecastResult> {
        require_observations(data, MIN_OBSERVATIONS)?;

        let values = data.values();
        let line = Self::fit_line(&values);
        let (intercept, slope) = (line.intercept(), line.slope());

        let fitted: Vec<f64> = (0..values.len())
            .map(|i| intercept + slope * i as f64)
            .collect();
        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .map(|(a, f)| a - f)
            .collect();

        let fit_rmse = metrics::rmse(&values, &fitted)?;
        let fit_mape = metrics::mape(&values, &fitted)?;
        let margin = metrics::z_score(self.confidence)? * metrics::std_dev(&residuals);

        // Extrapolate the fitted line past the last historical index
        let forecasts: Vec<f64> = (0..horizon)
            .map(|i| intercept + slope * (values.len() + i) as f64)
            .collect();

        ForecastResult::with_margin(
            self.name().to_string(),
            data.future_timestamps(horizon),
            forecasts,
            margin,
            fit_rmse,
            fit_mape,
        )
    }

    fn name(&self) -> &str {
        "Linear Regression"
    }
}

//! Holt-Winters triple exponential smoothing

use crate::data::TimeSeries;
use crate::error::Result;
use crate::metrics;
use crate::models::{require_observations, ForecastModel, ForecastResult};
use chrono::Duration;

/// Level smoothing constant
const ALPHA: f64 = 0.3;
/// Trend smoothing constant
const BETA: f64 = 0.2;
/// Seasonal smoothing constant
const GAMMA: f64 = 0.3;
/// Fixed 95% z-score; this model does not parameterize the confidence level
const BAND_Z_SCORE: f64 = 1.96;
/// Guard against division by a vanishing level or seasonal factor
const FACTOR_EPSILON: f64 = 1e-10;

/// Holt-Winters model decomposing a series into level, trend, and
/// multiplicative seasonal components.
///
/// Smoothing constants are fixed rather than fitted, the seasonal period is
/// inferred from the observation cadence (7 for daily, 4 for weekly, 12 for
/// monthly data), and the confidence band uses the full-series standard
/// deviation scaled by a fixed 95% z-score.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoltWinters;

impl HoltWinters {
    /// Create a new Holt-Winters model
    pub fn new() -> Self {
        Self
    }

    /// Seasonal period implied by the observation cadence
    fn seasonal_period(interval: Duration) -> usize {
        let days = interval.num_days();
        if days <= 2 {
            7
        } else if days <= 10 {
            4
        } else {
            12
        }
    }
}

impl ForecastModel for HoltWinters {
    fn min_observations(&self) -> usize {
        // Two full cycles of the smallest inferable period; daily and
        // monthly cadences require more, checked against the actual cadence
        // in forecast()
        8
    }

    fn forecast(&self, data: &TimeSeries, horizon: usize) -> Result<ForecastResult> {
        let period = Self::seasonal_period(data.average_interval());
        require_observations(data, 2 * period)?;

        let values = data.values();
        let n = values.len();

        // Initialize components from the first two seasonal cycles
        let first_cycle_mean = metrics::mean(&values[..period]);
        let second_cycle_mean = metrics::mean(&values[period..2 * period]);

        let mut level = first_cycle_mean;
        let mut trend = (second_cycle_mean - first_cycle_mean) / period as f64;
        let mut seasonal: Vec<f64> = values[..period]
            .iter()
            .map(|&v| {
                if first_cycle_mean.abs() > FACTOR_EPSILON {
                    v / first_cycle_mean
                } else {
                    1.0
                }
            })
            .collect();

        let mut fitted = Vec::with_capacity(n - period);
        for (i, &value) in values.iter().enumerate().skip(period) {
            let phase = i % period;
            let factor = if seasonal[phase].abs() > FACTOR_EPSILON {
                seasonal[phase]
            } else {
                1.0
            };

            fitted.push((level + trend) * factor);

            let previous_level = level;
            level = ALPHA * (value / factor) + (1.0 - ALPHA) * (level + trend);
            trend = BETA * (level - previous_level) + (1.0 - BETA) * trend;
            if level.abs() > FACTOR_EPSILON {
                seasonal[phase] = GAMMA * (value / level) + (1.0 - GAMMA) * seasonal[phase];
            }
        }

        let actual_tail = &values[period..];
        let fit_rmse = metrics::rmse(actual_tail, &fitted)?;
        let fit_mape = metrics::mape(actual_tail, &fitted)?;

        let forecasts: Vec<f64> = (0..horizon)
            .map(|i| {
                let phase = (n + i) % period;
                (level + (i + 1) as f64 * trend) * seasonal[phase]
            })
            .collect();

        let margin = BAND_Z_SCORE * data.std_dev()?;

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
        "Holt-Winters"
    }
}

//! ARIMA models for time series forecasting

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::metrics;
use crate::models::{
    require_observations, CoefficientEstimate, ForecastModel, ForecastResult,
};
use crate::transform::{difference, undifference};

/// Minimum observations required regardless of model orders
const MIN_OBSERVATIONS: usize = 10;
/// Default AR coefficient substituted when the Yule-Walker system is degenerate
const FALLBACK_AR_COEFFICIENT: f64 = 0.8;
/// Default MA coefficient substituted when the residual variance is degenerate
const FALLBACK_MA_COEFFICIENT: f64 = 0.2;
/// Stability clamp applied to every estimated coefficient
const COEFFICIENT_LIMIT: f64 = 0.99;
/// Below this an autocovariance or variance is treated as singular
const SINGULARITY_EPSILON: f64 = 1e-10;

/// ARIMA model (AutoRegressive Integrated Moving Average).
///
/// AR coefficients come from the Yule-Walker equations solved with the
/// Levinson-Durbin recursion over the differenced series; MA coefficients
/// come from a residual-autocorrelation heuristic rather than maximum
/// likelihood. Degenerate systems fall back to fixed default coefficients
/// instead of failing.
#[derive(Debug, Clone)]
pub struct Arima {
    /// Name of the model
    name: String,
    /// AR order (p)
    p: usize,
    /// Differencing order (d)
    d: usize,
    /// MA order (q)
    q: usize,
    /// Confidence level for the forecast bands
    confidence: f64,
}

impl Arima {
    /// Create a new ARIMA model with the given orders
    pub fn new(p: usize, d: usize, q: usize, confidence: f64) -> Result<Self> {
        if p == 0 || p > 10 {
            return Err(ForecastError::InvalidParameter(
                "AR order p must be between 1 and 10".to_string(),
            ));
        }
        if d > 2 {
            return Err(ForecastError::InvalidParameter(
                "Differencing order d must be at most 2".to_string(),
            ));
        }
        if q > 10 {
            return Err(ForecastError::InvalidParameter(
                "MA order q must be at most 10".to_string(),
            ));
        }
        if confidence <= 0.0 || confidence >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("ARIMA({},{},{})", p, d, q),
            p,
            d,
            q,
            confidence,
        })
    }

    /// Estimate AR coefficients from the differenced series via Yule-Walker.
    ///
    /// A singular autocovariance or a vanishing Levinson-Durbin denominator
    /// yields the fallback coefficient set.
    fn estimate_ar(&self, diffed: &[f64]) -> CoefficientEstimate {
        let fallback = CoefficientEstimate::Fallback(vec![FALLBACK_AR_COEFFICIENT; self.p]);

        let n = diffed.len();
        let mean = metrics::mean(diffed);
        let centered: Vec<f64> = diffed.iter().map(|v| v - mean).collect();

        let mut autocov = vec![0.0; self.p + 1];
        for (k, slot) in autocov.iter_mut().enumerate() {
            let mut sum = 0.0;
            for i in k..n {
                sum += centered[i] * centered[i - k];
            }
            *slot = sum / n as f64;
        }

        if autocov[0].abs() <= SINGULARITY_EPSILON {
            return fallback;
        }

        // Levinson-Durbin recursion over the Toeplitz system
        let mut coeffs = vec![0.0; self.p];
        coeffs[0] = autocov[1] / autocov[0];

        for k in 1..self.p {
            let mut numerator = autocov[k + 1];
            for j in 0..k {
                numerator -= coeffs[j] * autocov[k - j];
            }

            let mut denominator = autocov[0];
            for j in 0..k {
                denominator -= coeffs[j] * autocov[j + 1];
            }

            if denominator.abs() <= SINGULARITY_EPSILON {
                return fallback;
            }

            let reflection = numerator / denominator;
            let previous = coeffs.clone();
            coeffs[k] = reflection;
            for j in 0..k {
                coeffs[j] = previous[j] - reflection * previous[k - 1 - j];
            }
        }

        for coeff in &mut coeffs {
            *coeff = coeff.clamp(-COEFFICIENT_LIMIT, COEFFICIENT_LIMIT);
        }

        CoefficientEstimate::Estimated(coeffs)
    }

    /// Estimate MA coefficients from the autocorrelation of the AR fit
    /// residuals. This is a heuristic, not maximum likelihood.
    fn estimate_ma(&self, residuals: &[f64]) -> CoefficientEstimate {
        if self.q == 0 {
            return CoefficientEstimate::Estimated(Vec::new());
        }

        let n = residuals.len();
        let mean = metrics::mean(residuals);
        let centered: Vec<f64> = residuals.iter().map(|v| v - mean).collect();
        let variance = centered.iter().map(|v| v * v).sum::<f64>() / n.max(1) as f64;

        if variance.abs() <= SINGULARITY_EPSILON {
            return CoefficientEstimate::Fallback(vec![FALLBACK_MA_COEFFICIENT; self.q]);
        }

        let mut coeffs = vec![0.0; self.q];
        for (k, slot) in coeffs.iter_mut().enumerate() {
            let mut sum = 0.0;
            for i in (k + 1)..n {
                sum += centered[i] * centered[i - k - 1];
            }
            *slot = (sum / n as f64 / variance).clamp(-COEFFICIENT_LIMIT, COEFFICIENT_LIMIT);
        }

        CoefficientEstimate::Estimated(coeffs)
    }
}

impl Default for Arima {
    fn default() -> Self {
        Self {
            name: "ARIMA(1,1,1)".to_string(),
            p: 1,
            d: 1,
            q: 1,
            confidence: 0.95,
        }
    }
}

impl ForecastModel for Arima {
    fn min_observations(&self) -> usize {
        MIN_OBSERVATIONS
    }

    fn forecast(&self, data: &TimeSeries, horizon: usize) -> Result<ForecastResult> {
        require_observations(data, MIN_OBSERVATIONS)?;

        let values = data.values();
        let diffed = difference(&values, self.d);
        if diffed.len() <= self.p {
            return Err(ForecastError::InsufficientData {
                required: self.p + self.d + 1,
                actual: values.len(),
            });
        }

        let ar = self.estimate_ar(&diffed);
        let ar_coeffs = ar.coefficients();
        let diff_mean = metrics::mean(&diffed);

        // One-step-ahead AR predictions and residuals in the differenced domain
        let mut diff_predictions = vec![0.0; diffed.len()];
        let mut residuals = vec![0.0; diffed.len()];
        for i in self.p..diffed.len() {
            let mut prediction = diff_mean;
            for (j, coeff) in ar_coeffs.iter().enumerate() {
                prediction += coeff * (diffed[i - 1 - j] - diff_mean);
            }
            diff_predictions[i] = prediction;
            residuals[i] = diffed[i] - prediction;
        }

        let ma = self.estimate_ma(&residuals[self.p..]);
        let ma_coeffs = ma.coefficients();

        // Reconstruct level one-step predictions for in-sample scoring.
        // Differenced index i corresponds to level index i + d; each lower
        // difference order contributes its last observed value.
        let mut seqs: Vec<Vec<f64>> = Vec::with_capacity(self.d);
        for order in 0..self.d {
            seqs.push(difference(&values, order));
        }

        let mut level_actual = Vec::new();
        let mut level_predicted = Vec::new();
        for i in self.p..diffed.len() {
            let level_index = i + self.d;
            let mut prediction = diff_predictions[i];
            for (order, seq) in seqs.iter().enumerate() {
                prediction += seq[level_index - 1 - order];
            }
            level_actual.push(values[level_index]);
            level_predicted.push(prediction);
        }

        let (fit_rmse, fit_mape) = if level_actual.is_empty() {
            (0.0, 0.0)
        } else {
            (
                metrics::rmse(&level_actual, &level_predicted)?,
                metrics::mape(&level_actual, &level_predicted)?,
            )
        };

        let residual_std = metrics::std_dev(&residuals[self.p..]);
        let margin = metrics::z_score(self.confidence)? * residual_std;

        // AR+MA recursion over the differenced series; future shocks enter
        // the residual window as zero
        let mut history = diffed.clone();
        let mut recent_residuals = vec![0.0; self.q];
        for k in 0..self.q.min(residuals.len()) {
            recent_residuals[self.q - 1 - k] = residuals[residuals.len() - 1 - k];
        }

        let mut diff_forecasts = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let mut next = diff_mean;
            for (j, coeff) in ar_coeffs.iter().enumerate() {
                next += coeff * (history[history.len() - 1 - j] - diff_mean);
            }
            for (k, coeff) in ma_coeffs.iter().enumerate() {
                next += coeff * recent_residuals[recent_residuals.len() - 1 - k];
            }

            history.push(next);
            if self.q > 0 {
                recent_residuals.push(0.0);
            }
            diff_forecasts.push(next);
        }

        let level_forecasts = undifference(&diff_forecasts, &values, self.d);

        ForecastResult::with_margin(
            self.name.clone(),
            data.future_timestamps(horizon),
            level_forecasts,
            margin,
            fit_rmse,
            fit_mape,
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}

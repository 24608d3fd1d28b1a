//! Error metrics and distribution helpers for forecast evaluation

use crate::error::{ForecastError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Mean of a value sequence
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation of a value sequence
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Root mean square error between actual and predicted values
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            actual: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(ForecastError::DataError(
            "Cannot compute RMSE of empty arrays".to_string(),
        ));
    }

    let mse = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64;

    Ok(mse.sqrt())
}

/// Mean absolute percentage error between actual and predicted values.
///
/// Terms where the actual value is zero are skipped to avoid division by
/// zero; if every term is skipped the result is 0.
pub fn mape(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            actual: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(ForecastError::DataError(
            "Cannot compute MAPE of empty arrays".to_string(),
        ));
    }

    let mut sum = 0.0;
    let mut valid_terms = 0usize;
    for (a, p) in actual.iter().zip(predicted.iter()) {
        if *a != 0.0 {
            sum += ((a - p) / a).abs();
            valid_terms += 1;
        }
    }

    if valid_terms == 0 {
        return Ok(0.0);
    }

    Ok(sum / valid_terms as f64 * 100.0)
}

/// Two-sided z-score for a confidence level in (0, 1).
///
/// Uses the standard normal quantile, so z(0.95) ≈ 1.96.
pub fn z_score(confidence: f64) -> Result<f64> {
    if confidence <= 0.0 || confidence >= 1.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "Confidence level must be between 0 and 1, got {}",
            confidence
        )));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;

    Ok(normal.inverse_cdf(0.5 + confidence / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn rmse_of_perfect_fit_is_zero() {
        let actual = [1.0, 2.0, 3.0];
        assert_approx_eq!(rmse(&actual, &actual).unwrap(), 0.0);
    }

    #[test]
    fn z_score_matches_standard_quantiles() {
        assert_approx_eq!(z_score(0.95).unwrap(), 1.96, 1e-2);
        assert_approx_eq!(z_score(0.99).unwrap(), 2.576, 1e-2);
        assert!(z_score(0.99).unwrap() > z_score(0.95).unwrap());
    }
}

//! Model comparison and automatic selection by error metric

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::arima::Arima;
use crate::models::linear_regression::LinearRegression;
use crate::models::moving_average::MovingAverage;
use crate::models::{ForecastModel, ForecastResult};
use serde::{Deserialize, Serialize};

/// Minimum observations for a model comparison; matches the ARIMA floor
const MIN_OBSERVATIONS: usize = 10;
/// Window used for the moving average candidate
const COMPARISON_WINDOW: usize = 3;

/// Outcome of a model comparison: the winner plus every candidate that ran
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelComparison {
    /// Candidate with the lowest MAPE
    pub best: ForecastResult,
    /// All candidates that produced a forecast, ranked by MAPE ascending
    pub candidates: Vec<ForecastResult>,
}

/// Run the comparison set and return the candidate with the lowest MAPE.
///
/// The set is Moving Average (window 3), ARIMA(1,1,1), and Linear
/// Regression; Holt-Winters is available as a standalone model but does not
/// participate. A candidate that fails is logged and skipped. If every
/// candidate fails, Linear Regression is retried as the baseline with the
/// lowest data requirement before giving up.
pub fn best_forecast(
    data: &TimeSeries,
    horizon: usize,
    confidence: f64,
) -> Result<ModelComparison> {
    if data.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: data.len(),
        });
    }

    let models: Vec<Box<dyn ForecastModel>> = vec![
        Box::new(MovingAverage::new(COMPARISON_WINDOW, confidence)?),
        Box::new(Arima::new(1, 1, 1, confidence)?),
        Box::new(LinearRegression::new(confidence)?),
    ];

    let mut candidates = Vec::with_capacity(models.len());
    for model in &models {
        match model.forecast(data, horizon) {
            Ok(result) => candidates.push(result),
            Err(err) => {
                log::warn!("{} failed during model comparison: {}", model.name(), err);
            }
        }
    }

    if candidates.is_empty() {
        log::warn!("All comparison candidates failed, retrying the linear regression baseline");
        match LinearRegression::new(confidence)?.forecast(data, horizon) {
            Ok(result) => candidates.push(result),
            Err(err) => {
                log::warn!("Linear regression baseline failed: {}", err);
                return Err(ForecastError::AllModelsFailed);
            }
        }
    }

    candidates.sort_by(|a, b| mape_sort_key(a).total_cmp(&mape_sort_key(b)));
    let best = candidates[0].clone();

    Ok(ModelComparison { best, candidates })
}

/// Undefined MAPE sorts last
fn mape_sort_key(result: &ForecastResult) -> f64 {
    if result.mape.is_nan() {
        f64::INFINITY
    } else {
        result.mape
    }
}

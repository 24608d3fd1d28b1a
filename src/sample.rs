//! Synthetic series generation for demos and tests.
//!
//! Randomness is injected through a caller-supplied [`rand::Rng`], so a
//! seeded generator produces the same series every run and the forecasting
//! code itself stays deterministic.

use crate::data::{TimeSeries, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::TAU;

/// Parameters for a trend-plus-seasonality-plus-noise series
#[derive(Debug, Clone)]
pub struct SampleSeries {
    /// Starting level
    pub base: f64,
    /// Additive change per period
    pub trend: f64,
    /// Amplitude of the sinusoidal seasonal component
    pub seasonal_amplitude: f64,
    /// Seasonal cycle length in periods
    pub seasonal_period: usize,
    /// Standard deviation of the Gaussian perturbation
    pub noise: f64,
}

impl Default for SampleSeries {
    fn default() -> Self {
        Self {
            base: 1000.0,
            trend: 10.0,
            seasonal_amplitude: 50.0,
            seasonal_period: 12,
            noise: 20.0,
        }
    }
}

impl SampleSeries {
    /// Generate `len` evenly spaced observations starting at `start`.
    ///
    /// Values are clamped to be non-negative to match the domains the
    /// forecasting models assume.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        len: usize,
        start: DateTime<Utc>,
        interval: Duration,
        rng: &mut R,
    ) -> Result<TimeSeries> {
        if self.seasonal_period == 0 {
            return Err(ForecastError::InvalidParameter(
                "Seasonal period must be positive".to_string(),
            ));
        }

        let perturbation = Normal::new(0.0, self.noise)
            .map_err(|e| ForecastError::InvalidParameter(format!("Invalid noise level: {}", e)))?;

        let points = (0..len)
            .map(|i| {
                let phase = TAU * (i % self.seasonal_period) as f64 / self.seasonal_period as f64;
                let value = self.base
                    + self.trend * i as f64
                    + self.seasonal_amplitude * phase.sin()
                    + perturbation.sample(rng);

                TimeSeriesPoint::new(start + interval * i as i32, value.max(0.0))
            })
            .collect();

        TimeSeries::new(points)
    }
}

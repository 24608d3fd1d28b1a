//! # Market Forecast
//!
//! A Rust library for time series forecasting over market intelligence data.
//!
//! ## Features
//!
//! - Timestamped series handling with cadence inference
//! - Forecasting models: Moving Average, ARIMA(p,d,q), Holt-Winters, Linear Regression
//! - Confidence bands derived from in-sample residual variability
//! - Automatic model selection ranked by MAPE
//! - Seedable synthetic series generation for demos and tests
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use market_forecast::models::moving_average::MovingAverage;
//! use market_forecast::models::ForecastModel;
//! use market_forecast::{best_forecast, TimeSeries};
//!
//! // Twelve months of history
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let values: Vec<f64> = (0..12).map(|i| 1000.0 + 50.0 * i as f64).collect();
//! let history = TimeSeries::from_values(start, Duration::days(30), &values)?;
//!
//! // Forecast six periods with a single model
//! let model = MovingAverage::new(3, 0.95)?;
//! let result = model.forecast(&history, 6)?;
//! assert_eq!(result.horizon(), 6);
//!
//! // Or let the comparison pick the best model by MAPE
//! let comparison = best_forecast(&history, 6, 0.95)?;
//! println!("best model: {}", comparison.best.model_name);
//! # Ok::<(), market_forecast::ForecastError>(())
//! ```

pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod sample;
pub mod selection;
pub mod transform;

// Re-export commonly used types
pub use crate::data::{DataLoader, TimeSeries, TimeSeriesPoint};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{CoefficientEstimate, ForecastModel, ForecastResult};
pub use crate::selection::{best_forecast, ModelComparison};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

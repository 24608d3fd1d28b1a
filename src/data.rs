//! Time series data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Spacing assumed when a series is too short to infer a cadence
const DEFAULT_INTERVAL_DAYS: i64 = 30;

/// A single observation in a time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// When the observation was made
    pub timestamp: DateTime<Utc>,
    /// Observed value
    pub value: f64,
}

impl TimeSeriesPoint {
    /// Create a new observation
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// An ordered sequence of timestamped observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

/// Data loader for time series data
#[derive(Debug)]
pub struct DataLoader;

/// Shape of one row in a `timestamp,value` CSV file
#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    value: f64,
}

impl DataLoader {
    /// Load a time series from a two-column `timestamp,value` CSV file.
    ///
    /// Timestamps may be RFC 3339 or plain `YYYY-MM-DD` dates.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
        let mut reader = csv::Reader::from_path(path)?;

        let mut points = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row?;
            let timestamp = parse_timestamp(&row.timestamp)?;
            points.push(TimeSeriesPoint::new(timestamp, row.value));
        }

        if points.is_empty() {
            return Err(ForecastError::DataError(
                "CSV file contained no data rows".to_string(),
            ));
        }

        TimeSeries::new(points)
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date as UTC midnight
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let naive = date.and_time(NaiveTime::MIN);
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    Err(ForecastError::DataError(format!(
        "Unrecognized timestamp format: '{}'",
        raw
    )))
}

impl TimeSeries {
    /// Create a new time series from observations.
    ///
    /// Timestamps must be strictly ascending and values finite.
    pub fn new(points: Vec<TimeSeriesPoint>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(ForecastError::DataError(format!(
                    "Timestamps must be strictly ascending ({} does not follow {})",
                    pair[1].timestamp, pair[0].timestamp
                )));
            }
        }

        if points.iter().any(|p| !p.value.is_finite()) {
            return Err(ForecastError::DataError(
                "Series contains NaN or infinite values".to_string(),
            ));
        }

        Ok(Self { points })
    }

    /// Create a time series from timestamp/value pairs
    pub fn from_pairs(pairs: Vec<(DateTime<Utc>, f64)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(timestamp, value)| TimeSeriesPoint::new(timestamp, value))
                .collect(),
        )
    }

    /// Create an evenly spaced time series starting at `start`
    pub fn from_values(start: DateTime<Utc>, interval: Duration, values: &[f64]) -> Result<Self> {
        Self::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| TimeSeriesPoint::new(start + interval * i as i32, value))
                .collect(),
        )
    }

    /// Get the observations
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Get the observed values in order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Get the observation timestamps in order
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    /// Get the length of the time series
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the time series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the last observation, if any
    pub fn last(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }

    /// Calculate the mean of the observed values
    pub fn mean(&self) -> Result<f64> {
        if self.points.is_empty() {
            return Err(ForecastError::DataError(
                "No observations available".to_string(),
            ));
        }

        let sum: f64 = self.points.iter().map(|p| p.value).sum();
        Ok(sum / self.points.len() as f64)
    }

    /// Calculate the population standard deviation of the observed values
    pub fn std_dev(&self) -> Result<f64> {
        let mean = self.mean()?;
        let variance: f64 = self
            .points
            .iter()
            .map(|p| (p.value - mean).powi(2))
            .sum::<f64>()
            / self.points.len() as f64;

        Ok(variance.sqrt())
    }

    /// Mean spacing between consecutive observations.
    ///
    /// Falls back to 30 days when the series has one observation or fewer.
    pub fn average_interval(&self) -> Duration {
        if self.points.len() <= 1 {
            return Duration::days(DEFAULT_INTERVAL_DAYS);
        }

        let total_ms: i64 = self
            .points
            .windows(2)
            .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_milliseconds())
            .sum();

        Duration::milliseconds(total_ms / (self.points.len() as i64 - 1))
    }

    /// Project `horizon` future timestamps past the last observation,
    /// spaced at the historical average interval
    pub fn future_timestamps(&self, horizon: usize) -> Vec<DateTime<Utc>> {
        let last = match self.points.last() {
            Some(point) => point.timestamp,
            None => return Vec::new(),
        };

        let interval = self.average_interval();
        (1..=horizon as i32).map(|i| last + interval * i).collect()
    }
}

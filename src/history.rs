//! Historical observation store backing the forecast engine.
//!
//! Loads the wide per-day dataset (one `date` column plus one column per
//! monitored parameter) and hands out the trailing windows predictors consume.
//! The store is immutable once loaded; the service never appends to it.

use chrono::NaiveDate;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::model::{ForecastError, InitError, Parameter, HISTORY_WINDOW};

/// Header of the observation-date column.
pub const DATE_COLUMN: &str = "date";

const PARAMETER_COUNT: usize = Parameter::ALL.len();

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// In-memory history: one strictly ascending date axis and one value series
/// per parameter. Cells may be missing; a gap only matters once it falls
/// inside a requested window.
#[derive(Debug)]
pub struct HistoryStore {
    dates: Vec<NaiveDate>,
    series: [Vec<Option<f64>>; PARAMETER_COUNT],
}

impl HistoryStore {
    /// Loads the dataset from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> Result<HistoryStore, InitError> {
        let file = File::open(path).map_err(|e| InitError::Read {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        HistoryStore::from_reader(BufReader::new(file))
    }

    /// Parses the dataset from any reader. Fails on a missing `date` or
    /// parameter column, an empty body, or a non-ascending date axis.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<HistoryStore, InitError> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| InitError::InvalidHistory(e.to_string()))?
            .clone();

        let date_idx = headers
            .iter()
            .position(|h| h == DATE_COLUMN)
            .ok_or(InitError::MissingColumn(DATE_COLUMN))?;

        let mut column_indices = [0usize; PARAMETER_COUNT];
        for parameter in Parameter::ALL {
            column_indices[parameter as usize] = headers
                .iter()
                .position(|h| h == parameter.key())
                .ok_or(InitError::MissingColumn(parameter.key()))?;
        }

        let mut dates: Vec<NaiveDate> = Vec::new();
        let mut series: [Vec<Option<f64>>; PARAMETER_COUNT] =
            std::array::from_fn(|_| Vec::new());

        for (row, result) in reader.records().enumerate() {
            let record = result.map_err(|e| InitError::InvalidHistory(e.to_string()))?;

            let raw_date = record.get(date_idx).unwrap_or("");
            let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d").map_err(|_| {
                InitError::InvalidHistory(format!("bad date '{}' in row {}", raw_date, row + 1))
            })?;

            if let Some(prev) = dates.last() {
                if *prev >= date {
                    return Err(InitError::InvalidHistory(format!(
                        "dates must be strictly ascending: {} follows {} in row {}",
                        date,
                        prev,
                        row + 1
                    )));
                }
            }
            dates.push(date);

            for parameter in Parameter::ALL {
                let cell = record.get(column_indices[parameter as usize]).unwrap_or("");
                series[parameter as usize].push(parse_cell(cell));
            }
        }

        if dates.is_empty() {
            return Err(InitError::InvalidHistory(
                "dataset has a header but no observation rows".to_string(),
            ));
        }

        Ok(HistoryStore { dates, series })
    }

    /// Number of observation rows on record.
    pub fn observations(&self) -> usize {
        self.dates.len()
    }

    /// First and last observation dates. Construction guarantees at least
    /// one row, so the range always exists.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.dates[0], self.dates[self.dates.len() - 1])
    }

    /// Returns the most recent `HISTORY_WINDOW` observations for a parameter,
    /// oldest first, exactly as predictors consume them.
    ///
    /// Fails if fewer rows than the window exist, or if any cell inside the
    /// window is missing. Gaps older than the window are tolerated.
    pub fn last_window(
        &self,
        parameter: Parameter,
    ) -> Result<[f64; HISTORY_WINDOW], ForecastError> {
        let values = &self.series[parameter as usize];
        if values.len() < HISTORY_WINDOW {
            return Err(ForecastError::ShortHistory {
                parameter,
                required: HISTORY_WINDOW,
                available: values.len(),
            });
        }

        let tail = &values[values.len() - HISTORY_WINDOW..];
        let mut window = [0.0; HISTORY_WINDOW];
        for (slot, cell) in window.iter_mut().zip(tail) {
            *slot = cell.ok_or(ForecastError::SparseHistory { parameter })?;
        }
        Ok(window)
    }
}

/// Parses one CSV cell. Empty and non-numeric cells read as missing, as do
/// non-finite values, so NaN can never leak into a predictor window.
fn parse_cell(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

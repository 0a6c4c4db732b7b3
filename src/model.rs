//! Core data types for the Varanasi water-quality forecasting service.
//!
//! This module defines the shared domain model imported by all other modules:
//! the supported parameter set, forecast windows, threshold rules, alerts, and
//! the service error types. No I/O lives here.

use serde::{Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Fixed pipeline dimensions
// ---------------------------------------------------------------------------

/// Number of trailing observations every predictor consumes.
pub const HISTORY_WINDOW: usize = 10;

/// Number of daily steps every predictor forecasts.
pub const FORECAST_HORIZON: usize = 3;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// A measured and forecast water-quality parameter.
///
/// The set is closed: every parameter is statically bound to one predictor
/// slot and at most one threshold rule (see `parameters::PARAMETER_REGISTRY`).
/// Declaration order is the canonical forecast and presentation order, which
/// is why the ordering derives matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    Rainfall,
    WaterLevel,
    Flow,
    Temperature,
    DissolvedOxygen,
    Bod,
    Nitrate,
    FecalColiform,
}

impl Parameter {
    /// All supported parameters, in forecast order.
    pub const ALL: [Parameter; 8] = [
        Parameter::Rainfall,
        Parameter::WaterLevel,
        Parameter::Flow,
        Parameter::Temperature,
        Parameter::DissolvedOxygen,
        Parameter::Bod,
        Parameter::Nitrate,
        Parameter::FecalColiform,
    ];

    /// Canonical key: the dataset column name, the model artifact file stem,
    /// and the JSON field name in API responses.
    pub const fn key(self) -> &'static str {
        match self {
            Parameter::Rainfall => "rainfall_mm",
            Parameter::WaterLevel => "water_level_meters",
            Parameter::Flow => "flow_m3_s",
            Parameter::Temperature => "temperature_celsius",
            Parameter::DissolvedOxygen => "do_mg_L",
            Parameter::Bod => "bod_mg_L",
            Parameter::Nitrate => "nitrate_mg_L",
            Parameter::FecalColiform => "fecal_coliform_mpn_100ml",
        }
    }

    /// Looks up a parameter by its canonical key. Returns `None` for keys
    /// outside the supported set.
    pub fn from_key(key: &str) -> Option<Parameter> {
        Parameter::ALL.into_iter().find(|p| p.key() == key)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Forecast values
// ---------------------------------------------------------------------------

/// Rounds to 2 decimal digits, the precision every forecast is published at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// An ordered sequence of `FORECAST_HORIZON` predictions for one parameter.
///
/// Values are rounded to 2 decimals at construction and never change
/// afterwards; serializes as a plain JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastWindow {
    values: [f64; FORECAST_HORIZON],
}

impl ForecastWindow {
    /// Builds a window from raw predictor output, rounding each value.
    pub fn from_raw(raw: [f64; FORECAST_HORIZON]) -> Self {
        ForecastWindow {
            values: raw.map(round2),
        }
    }

    pub fn values(&self) -> &[f64; FORECAST_HORIZON] {
        &self.values
    }

    /// Largest forecast value in the window.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest forecast value in the window.
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

// ---------------------------------------------------------------------------
// Threshold types
// ---------------------------------------------------------------------------

/// Direction of a threshold breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdCondition {
    /// Alert when the forecast maximum exceeds the limit.
    Above,
    /// Alert when the forecast minimum drops under the limit.
    Below,
}

/// Declarative public-safety rule for one parameter.
///
/// Stored in `parameters::PARAMETER_REGISTRY`; the limit is compared strictly,
/// so a forecast sitting exactly on it raises nothing.
#[derive(Debug, Clone)]
pub struct ThresholdRule {
    pub limit: f64,
    pub condition: ThresholdCondition,
    pub display_name: &'static str,
}

// ---------------------------------------------------------------------------
// Alert types
// ---------------------------------------------------------------------------

/// Alert severity. Only the water-level flood rule produces `FloodCritical`;
/// every other breach is a standard warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Warning,
    FloodCritical,
}

/// A rendered public-safety alert for one parameter in one report cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub parameter: Parameter,
    pub severity: AlertSeverity,
    pub message: String,
}

impl Alert {
    pub fn is_flood(&self) -> bool {
        self.severity == AlertSeverity::FloodCritical
    }
}

// API responses carry alerts as plain message strings.
impl Serialize for Alert {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that prevent the service from starting at all.
///
/// These are fatal by policy: the registry never operates with a partial
/// model set, and a broken dataset means no report can be trusted. The batch
/// binary aborts on them; the server answers every request with an
/// availability error instead.
#[derive(Debug, PartialEq)]
pub enum InitError {
    /// A required file could not be read from disk.
    Read { path: String, detail: String },
    /// The history dataset is structurally unusable.
    InvalidHistory(String),
    /// The history dataset lacks a required parameter column.
    MissingColumn(&'static str),
    /// A model artifact exists but is malformed or inconsistent.
    InvalidArtifact { path: String, detail: String },
    /// No model artifact found for a supported parameter.
    MissingModel(Parameter),
    /// The service configuration file is unusable.
    InvalidConfig(String),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Read { path, detail } => write!(f, "cannot read {}: {}", path, detail),
            InitError::InvalidHistory(detail) => write!(f, "invalid history dataset: {}", detail),
            InitError::MissingColumn(column) => {
                write!(f, "history dataset is missing column '{}'", column)
            }
            InitError::InvalidArtifact { path, detail } => {
                write!(f, "invalid model artifact {}: {}", path, detail)
            }
            InitError::MissingModel(parameter) => {
                write!(f, "no model artifact for parameter '{}'", parameter)
            }
            InitError::InvalidConfig(detail) => write!(f, "invalid configuration: {}", detail),
        }
    }
}

impl std::error::Error for InitError {}

/// Errors that fail one report cycle.
///
/// A cycle either produces a complete report covering every loaded parameter
/// or fails outright. A report silently missing a parameter would read as an
/// all-clear for it, which is worse than no report.
#[derive(Debug, PartialEq)]
pub enum ForecastError {
    /// Fewer observations on record than the predictor's window needs.
    ShortHistory {
        parameter: Parameter,
        required: usize,
        available: usize,
    },
    /// The trailing window exists but has missing values in it.
    SparseHistory { parameter: Parameter },
    /// The predictor itself failed on a well-formed window.
    PredictorFailure { parameter: Parameter, detail: String },
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::ShortHistory {
                parameter,
                required,
                available,
            } => write!(
                f,
                "history for '{}' too short: need {} observations, have {}",
                parameter, required, available
            ),
            ForecastError::SparseHistory { parameter } => {
                write!(f, "history for '{}' has gaps in the requested window", parameter)
            }
            ForecastError::PredictorFailure { parameter, detail } => {
                write!(f, "predictor for '{}' failed: {}", parameter, detail)
            }
        }
    }
}

impl std::error::Error for ForecastError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

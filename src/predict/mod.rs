//! Per-parameter forecast predictors.
//!
//! Every model is trained offline and shipped as a JSON artifact; the service
//! loads the full set once at startup and holds each model behind the
//! object-safe `Predictor` trait, so the forecast engine never depends on a
//! concrete model family.

pub mod linear;
pub mod registry;

pub use linear::LinearModel;
pub use registry::PredictorRegistry;

use crate::model::{FORECAST_HORIZON, HISTORY_WINDOW};

/// Common interface for all per-parameter forecast models.
///
/// A predictor is a pure function of its input window: no I/O and no interior
/// state, which keeps trait objects freely shareable across request handlers.
pub trait Predictor: Send + Sync {
    /// Predicts the next `FORECAST_HORIZON` daily values from the most recent
    /// `HISTORY_WINDOW` observations, oldest first.
    ///
    /// Raw output, unrounded. The error string names what went wrong inside
    /// the model; the forecast engine attaches the parameter.
    fn predict(&self, window: &[f64; HISTORY_WINDOW])
        -> Result<[f64; FORECAST_HORIZON], String>;

    /// Short model family name, for logs and load summaries.
    fn name(&self) -> &'static str;
}

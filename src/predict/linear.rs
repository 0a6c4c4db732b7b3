//! Direct multi-horizon linear models loaded from JSON artifacts.
//!
//! Training happens offline; what ships is one artifact per parameter holding
//! a weight row and an intercept per forecast day. Day `h` of the forecast is
//! `dot(coefficients[h], window) + intercepts[h]`, so each horizon step is
//! predicted directly from the observed window rather than recursively.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::model::{InitError, Parameter, FORECAST_HORIZON, HISTORY_WINDOW};
use crate::predict::Predictor;

// ---------------------------------------------------------------------------
// Artifact schema
// ---------------------------------------------------------------------------

/// On-disk schema of a trained model artifact (`<parameter-key>_model.json`).
///
/// Dimensions are carried redundantly in `window` and `horizon` so a stale
/// artifact trained against different pipeline constants is rejected at load
/// instead of producing shifted forecasts.
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    pub parameter: String,
    pub window: usize,
    pub horizon: usize,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Linear model
// ---------------------------------------------------------------------------

/// A trained direct multi-horizon linear regressor for one parameter.
#[derive(Debug)]
pub struct LinearModel {
    coefficients: [[f64; HISTORY_WINDOW]; FORECAST_HORIZON],
    intercepts: [f64; FORECAST_HORIZON],
}

impl LinearModel {
    /// Reads and validates an artifact file. `expected` is the parameter the
    /// file name promised; a mismatched body is rejected.
    pub fn from_artifact_path(path: &Path, expected: Parameter) -> Result<LinearModel, InitError> {
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|e| InitError::Read {
            path: display.clone(),
            detail: e.to_string(),
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&raw).map_err(|e| InitError::InvalidArtifact {
                path: display.clone(),
                detail: e.to_string(),
            })?;
        LinearModel::from_artifact(artifact, expected, &display)
    }

    /// Validates artifact dimensions against the pipeline constants and
    /// builds the model.
    pub fn from_artifact(
        artifact: ModelArtifact,
        expected: Parameter,
        path: &str,
    ) -> Result<LinearModel, InitError> {
        let invalid = |detail: String| InitError::InvalidArtifact {
            path: path.to_string(),
            detail,
        };

        if artifact.parameter != expected.key() {
            return Err(invalid(format!(
                "artifact is for '{}', expected '{}'",
                artifact.parameter,
                expected.key()
            )));
        }
        if artifact.window != HISTORY_WINDOW {
            return Err(invalid(format!(
                "trained on a window of {}, this service uses {}",
                artifact.window, HISTORY_WINDOW
            )));
        }
        if artifact.horizon != FORECAST_HORIZON {
            return Err(invalid(format!(
                "trained for a horizon of {}, this service uses {}",
                artifact.horizon, FORECAST_HORIZON
            )));
        }
        if artifact.coefficients.len() != FORECAST_HORIZON {
            return Err(invalid(format!(
                "expected {} coefficient rows, found {}",
                FORECAST_HORIZON,
                artifact.coefficients.len()
            )));
        }
        if artifact.intercepts.len() != FORECAST_HORIZON {
            return Err(invalid(format!(
                "expected {} intercepts, found {}",
                FORECAST_HORIZON,
                artifact.intercepts.len()
            )));
        }

        let mut coefficients = [[0.0; HISTORY_WINDOW]; FORECAST_HORIZON];
        for (day, row) in artifact.coefficients.iter().enumerate() {
            if row.len() != HISTORY_WINDOW {
                return Err(invalid(format!(
                    "coefficient row {} has {} weights, expected {}",
                    day,
                    row.len(),
                    HISTORY_WINDOW
                )));
            }
            if row.iter().any(|w| !w.is_finite()) {
                return Err(invalid(format!("non-finite weight in row {}", day)));
            }
            coefficients[day].copy_from_slice(row);
        }

        let mut intercepts = [0.0; FORECAST_HORIZON];
        if artifact.intercepts.iter().any(|b| !b.is_finite()) {
            return Err(invalid("non-finite intercept".to_string()));
        }
        intercepts.copy_from_slice(&artifact.intercepts);

        Ok(LinearModel {
            coefficients,
            intercepts,
        })
    }
}

impl Predictor for LinearModel {
    fn predict(
        &self,
        window: &[f64; HISTORY_WINDOW],
    ) -> Result<[f64; FORECAST_HORIZON], String> {
        let mut forecast = [0.0; FORECAST_HORIZON];
        for (day, (weights, intercept)) in
            self.coefficients.iter().zip(self.intercepts).enumerate()
        {
            let dot: f64 = weights.iter().zip(window).map(|(w, x)| w * x).sum();
            let value = dot + intercept;
            if !value.is_finite() {
                return Err(format!("non-finite prediction for day {}", day + 1));
            }
            forecast[day] = value;
        }
        Ok(forecast)
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

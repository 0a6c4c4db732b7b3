//! Startup-loaded registry of per-parameter predictors.

use std::collections::BTreeMap;
use std::path::Path;

use crate::model::{InitError, Parameter};
use crate::predict::{LinearModel, Predictor};

/// File-name suffix every model artifact carries: `<parameter-key>_model.json`.
pub const ARTIFACT_SUFFIX: &str = "_model.json";

/// Immutable map from parameter to its loaded predictor.
///
/// `load_dir` refuses to build a partial registry: a missing or malformed
/// artifact for any supported parameter is a startup failure, never a
/// silently absent forecast. Unknown files in the directory are ignored.
pub struct PredictorRegistry {
    models: BTreeMap<Parameter, Box<dyn Predictor>>,
}

impl PredictorRegistry {
    /// Loads one artifact per supported parameter from `dir`.
    pub fn load_dir(dir: &Path) -> Result<PredictorRegistry, InitError> {
        let mut models: BTreeMap<Parameter, Box<dyn Predictor>> = BTreeMap::new();
        for parameter in Parameter::ALL {
            let path = dir.join(format!("{}{}", parameter.key(), ARTIFACT_SUFFIX));
            if !path.is_file() {
                return Err(InitError::MissingModel(parameter));
            }
            let model = LinearModel::from_artifact_path(&path, parameter)?;
            tracing::debug!(parameter = %parameter, family = model.name(), "model artifact loaded");
            models.insert(parameter, Box::new(model));
        }
        Ok(PredictorRegistry { models })
    }

    /// Builds a registry from preconstructed predictors. Lets tests inject
    /// stub models; production loading goes through `load_dir`.
    pub fn from_models(models: BTreeMap<Parameter, Box<dyn Predictor>>) -> PredictorRegistry {
        PredictorRegistry { models }
    }

    pub fn get(&self, parameter: Parameter) -> Option<&dyn Predictor> {
        self.models.get(&parameter).map(|m| m.as_ref())
    }

    /// Iterates loaded predictors in canonical parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, &dyn Predictor)> {
        self.models.iter().map(|(p, m)| (*p, m.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

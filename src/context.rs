//! Startup-built service context shared by every report cycle.

use std::fmt;

use crate::config::ServiceConfig;
use crate::history::HistoryStore;
use crate::model::InitError;
use crate::predict::PredictorRegistry;

/// Everything one report cycle reads: the location label, the loaded
/// predictor registry, and the observation history. Built once at startup
/// and immutable afterwards; callers pass it by reference.
pub struct ServiceContext {
    pub location: String,
    pub registry: PredictorRegistry,
    pub history: HistoryStore,
}

/// Manual impl: the registry holds `dyn Predictor` trait objects, which carry
/// no `Debug` bound, so the struct cannot derive it.
impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("location", &self.location)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl ServiceContext {
    /// Loads the dataset and the full model set per the configuration.
    ///
    /// Any failure is fatal to initialization; the caller decides whether
    /// that aborts the process (report binary) or leaves the API serving an
    /// availability error (server binary).
    pub fn load(config: &ServiceConfig) -> Result<ServiceContext, InitError> {
        let history = HistoryStore::from_csv_path(&config.data_file)?;
        let registry = PredictorRegistry::load_dir(&config.models_dir)?;
        Ok(ServiceContext {
            location: config.location.clone(),
            registry,
            history,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

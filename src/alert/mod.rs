//! Alerting: threshold rule evaluation and pollution source inference.

pub mod source;
pub mod thresholds;

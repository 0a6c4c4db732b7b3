//! Pollution source inference over a forecast cycle.
//!
//! A fixed decision table, evaluated top to bottom; the first matching rule
//! wins. The cutoffs mirror the alert limits for the same parameters but are
//! owned here: inference is a statement about likely cause, not a repeat of
//! the public-safety rules.

use std::collections::BTreeMap;

use crate::model::{ForecastWindow, Parameter};

/// Combined organic and bacterial load points at sewage.
pub const SOURCE_SEWAGE: &str = "Untreated sewage outflow is the likely primary source.";

/// Elevated nitrate alone points at fertilizer runoff.
pub const SOURCE_RUNOFF: &str = "Agricultural runoff is a likely contributing source.";

/// Nothing in the cycle suggests a pollution source.
pub const SOURCE_WITHIN_LIMITS: &str = "Pollution levels appear to be within standard limits.";

const SEWAGE_BOD_CUTOFF: f64 = 8.0;
const SEWAGE_FECAL_CUTOFF: f64 = 20_000.0;
const RUNOFF_NITRATE_CUTOFF: f64 = 10.0;

/// Infers the likely pollution source from a cycle's forecasts.
///
/// Reads the forecast peaks of BOD, fecal coliform, and nitrate; a parameter
/// absent from the cycle contributes a peak of 0.0 and simply never trips
/// its rule.
pub fn infer_pollution_source(forecasts: &BTreeMap<Parameter, ForecastWindow>) -> &'static str {
    let peak = |parameter: Parameter| {
        forecasts
            .get(&parameter)
            .map(ForecastWindow::max)
            .unwrap_or(0.0)
    };

    if peak(Parameter::Bod) > SEWAGE_BOD_CUTOFF
        && peak(Parameter::FecalColiform) > SEWAGE_FECAL_CUTOFF
    {
        return SOURCE_SEWAGE;
    }
    if peak(Parameter::Nitrate) > RUNOFF_NITRATE_CUTOFF {
        return SOURCE_RUNOFF;
    }
    SOURCE_WITHIN_LIMITS
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! One-shot report pipeline over a loaded service context.

use crate::context::ServiceContext;
use crate::forecast;
use crate::model::ForecastError;
use crate::report::{self, ForecastReport};

/// Runs one full cycle: forecasts every loaded parameter from current
/// history, evaluates the threshold rules, infers the pollution source, and
/// assembles the report. Stateless; each call reads the context afresh.
pub fn run_report(ctx: &ServiceContext) -> Result<ForecastReport, ForecastError> {
    let forecasts = forecast::forecast_all(&ctx.registry, &ctx.history)?;
    Ok(report::assemble(&ctx.location, forecasts))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

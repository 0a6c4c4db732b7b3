//! Threshold rule evaluation for forecast windows.
//!
//! Each parameter yields zero or one alert per cycle. Comparisons are strict
//! on both sides, so a forecast sitting exactly on a limit stays quiet.

use std::collections::BTreeMap;

use crate::model::{
    Alert, AlertSeverity, ForecastWindow, Parameter, ThresholdCondition,
};
use crate::parameters;

/// Evaluates one parameter's forecast against its threshold rule.
///
/// The water-level rule is checked before the generic branches: breaching the
/// danger level is a flood, with its own severity and wording.
pub fn evaluate(parameter: Parameter, forecast: &ForecastWindow) -> Option<Alert> {
    let rule = parameters::threshold_rule(parameter)?;

    if parameter == Parameter::WaterLevel {
        let peak = forecast.max();
        if peak > rule.limit {
            let unit = parameters::spec_for(parameter).unit;
            return Some(Alert {
                parameter,
                severity: AlertSeverity::FloodCritical,
                message: format!(
                    "FLOOD ALERT: {} is forecast to reach {}{}, exceeding the danger level of {}{}.",
                    rule.display_name, peak, unit, rule.limit, unit
                ),
            });
        }
    }

    match rule.condition {
        ThresholdCondition::Above => {
            let peak = forecast.max();
            if peak > rule.limit {
                return Some(Alert {
                    parameter,
                    severity: AlertSeverity::Warning,
                    message: format!(
                        "High Level Warning: {} is forecast to reach {}.",
                        rule.display_name, peak
                    ),
                });
            }
        }
        ThresholdCondition::Below => {
            let low = forecast.min();
            if low < rule.limit {
                return Some(Alert {
                    parameter,
                    severity: AlertSeverity::Warning,
                    message: format!(
                        "Low Level Warning: {} is forecast to drop to {}.",
                        rule.display_name, low
                    ),
                });
            }
        }
    }
    None
}

/// Evaluates a full forecast cycle and returns the presentation-ordered
/// alert list: the flood alert first, then the remaining alerts in forecast
/// order.
pub fn evaluate_all(forecasts: &BTreeMap<Parameter, ForecastWindow>) -> Vec<Alert> {
    let alerts = forecasts
        .iter()
        .filter_map(|(parameter, forecast)| evaluate(*parameter, forecast))
        .collect();
    prioritize(alerts)
}

/// Reorders alerts so the flood alert (at most one per cycle) leads the list.
/// The relative order of the remaining alerts is preserved.
pub fn prioritize(alerts: Vec<Alert>) -> Vec<Alert> {
    let (flood, rest): (Vec<Alert>, Vec<Alert>) =
        alerts.into_iter().partition(|alert| alert.is_flood());
    let mut ordered = flood;
    ordered.extend(rest);
    ordered
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

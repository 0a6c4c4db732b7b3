//! Report assembly: one cycle's forecasts, alerts, and source inference,
//! rendered as JSON for the API or as a fixed-width console report.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::alert::{source, thresholds};
use crate::model::{Alert, ForecastWindow, Parameter};

/// Printed in the alert section when nothing fired.
pub const ALL_CLEAR: &str = "All parameters are forecast to be within safe levels.";

const TABLE_WIDTH: usize = 60;
const ALERT_WIDTH: usize = 70;

/// The complete output of one forecast cycle.
///
/// Serializes to the published API body: forecasts keyed by parameter in
/// canonical order, alerts as plain message strings, flood first.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub location: String,
    pub forecasts: BTreeMap<Parameter, ForecastWindow>,
    pub alerts: Vec<Alert>,
    pub source_inference: String,
}

/// Assembles the report for one completed forecast cycle: evaluates the
/// threshold rules, orders the alerts, and attaches the source inference.
pub fn assemble(
    location: &str,
    forecasts: BTreeMap<Parameter, ForecastWindow>,
) -> ForecastReport {
    let alerts = thresholds::evaluate_all(&forecasts);
    let source_inference = source::infer_pollution_source(&forecasts).to_string();
    ForecastReport {
        location: location.to_string(),
        forecasts,
        alerts,
        source_inference,
    }
}

impl ForecastReport {
    /// Renders the report as the fixed-width console layout: the forecast
    /// table, then the alert section.
    pub fn render_console(&self) -> String {
        let table_rule = "=".repeat(TABLE_WIDTH);
        let alert_rule = "=".repeat(ALERT_WIDTH);
        let mut out = String::new();

        out.push_str(&table_rule);
        out.push('\n');
        out.push_str("        COMPREHENSIVE 3-DAY FORECAST\n");
        out.push_str(&table_rule);
        out.push('\n');
        out.push_str(&format!(
            "{:<30} | {:>8} | {:>8} | {:>8}\n",
            "Parameter", "Day 1", "Day 2", "Day 3"
        ));
        out.push_str(&"-".repeat(TABLE_WIDTH));
        out.push('\n');
        for (parameter, window) in &self.forecasts {
            let values = window.values();
            out.push_str(&format!(
                "{:<30} | {:>8.2} | {:>8.2} | {:>8.2}\n",
                parameter.key(),
                values[0],
                values[1],
                values[2]
            ));
        }
        out.push_str(&table_rule);
        out.push('\n');

        out.push('\n');
        out.push_str(&alert_rule);
        out.push('\n');
        out.push_str("                      PUBLIC SAFETY ALERTS\n");
        out.push_str(&alert_rule);
        out.push('\n');
        if self.alerts.is_empty() {
            out.push_str(&format!("  {}\n", ALL_CLEAR));
        } else {
            for alert in &self.alerts {
                out.push_str(&format!("  {}\n", alert.message));
            }
        }
        out.push_str(&alert_rule);
        out.push('\n');

        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn forecasts(entries: &[(Parameter, [f64; 3])]) -> BTreeMap<Parameter, ForecastWindow> {
        entries
            .iter()
            .map(|(p, values)| (*p, ForecastWindow::from_raw(*values)))
            .collect()
    }

    /// A quiet cycle: every parameter well inside its limits.
    fn quiet_cycle() -> BTreeMap<Parameter, ForecastWindow> {
        forecasts(&[
            (Parameter::Rainfall, [2.1, 2.3, 2.2]),
            (Parameter::WaterLevel, [70.1, 70.3, 70.0]),
            (Parameter::Flow, [1500.0, 1520.0, 1510.0]),
            (Parameter::Temperature, [26.0, 26.5, 26.2]),
            (Parameter::DissolvedOxygen, [6.5, 6.4, 6.6]),
            (Parameter::Bod, [4.0, 4.2, 4.1]),
            (Parameter::Nitrate, [6.0, 6.1, 5.9]),
            (Parameter::FecalColiform, [12_000.0, 11_500.0, 11_800.0]),
        ])
    }

    #[test]
    fn test_assemble_surfaces_flood_alert_first() {
        let mut cycle = quiet_cycle();
        cycle.insert(Parameter::Bod, ForecastWindow::from_raw([9.0, 9.5, 9.2]));
        cycle.insert(
            Parameter::WaterLevel,
            ForecastWindow::from_raw([72.0, 73.2, 72.4]),
        );

        let report = assemble("Varanasi", cycle);
        assert_eq!(report.alerts.len(), 2);
        assert!(report.alerts[0].is_flood(), "flood alert must lead the list");
        assert_eq!(report.alerts[1].parameter, Parameter::Bod);
    }

    #[test]
    fn test_assemble_quiet_cycle_is_all_clear() {
        let report = assemble("Varanasi", quiet_cycle());
        assert!(report.alerts.is_empty());
        assert_eq!(report.source_inference, source::SOURCE_WITHIN_LIMITS);
    }

    #[test]
    fn test_report_serializes_to_published_shape() {
        let mut cycle = quiet_cycle();
        cycle.insert(
            Parameter::WaterLevel,
            ForecastWindow::from_raw([72.0, 73.2, 72.4]),
        );
        let report = assemble("Varanasi", cycle);

        let body = serde_json::to_value(&report).unwrap();
        assert_eq!(body["location"], "Varanasi");
        assert_eq!(
            body["forecasts"].as_object().unwrap().len(),
            Parameter::ALL.len()
        );
        assert_eq!(
            body["forecasts"]["water_level_meters"],
            serde_json::json!([72.0, 73.2, 72.4])
        );
        // Alerts are plain strings on the wire.
        let alerts = body["alerts"].as_array().unwrap();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].as_str().unwrap().starts_with("FLOOD ALERT:"));
        assert_eq!(body["source_inference"], source::SOURCE_WITHIN_LIMITS);
    }

    #[test]
    fn test_console_table_layout() {
        let report = assemble(
            "Varanasi",
            forecasts(&[
                (Parameter::WaterLevel, [70.1, 70.3, 70.0]),
                (Parameter::Bod, [4.0, 4.25, 4.1]),
            ]),
        );
        let rendered = report.render_console();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[1], "        COMPREHENSIVE 3-DAY FORECAST");
        assert_eq!(
            lines[3],
            "Parameter                      |    Day 1 |    Day 2 |    Day 3"
        );
        assert_eq!(lines[4], "-".repeat(60));
        assert_eq!(
            lines[5],
            "water_level_meters             |    70.10 |    70.30 |    70.00"
        );
        assert_eq!(
            lines[6],
            "bod_mg_L                       |     4.00 |     4.25 |     4.10"
        );
        assert_eq!(lines[7], "=".repeat(60));
    }

    #[test]
    fn test_console_all_clear_is_verbatim() {
        let report = assemble("Varanasi", quiet_cycle());
        let rendered = report.render_console();
        assert!(
            rendered.contains("  All parameters are forecast to be within safe levels.\n"),
            "all-clear line missing or reworded:\n{}",
            rendered
        );
    }

    #[test]
    fn test_console_alert_section_lists_flood_first() {
        let mut cycle = quiet_cycle();
        cycle.insert(Parameter::Bod, ForecastWindow::from_raw([9.0, 9.5, 9.2]));
        cycle.insert(
            Parameter::WaterLevel,
            ForecastWindow::from_raw([72.0, 73.2, 72.4]),
        );
        let rendered = assemble("Varanasi", cycle).render_console();

        let flood = rendered
            .find("  FLOOD ALERT:")
            .expect("flood line must be rendered");
        let warning = rendered
            .find("  High Level Warning:")
            .expect("warning line must be rendered");
        assert!(flood < warning, "flood alert must print before warnings");
        assert!(!rendered.contains(ALL_CLEAR));
    }
}

//! Parameter registry for the Varanasi water-quality forecasting service.
//!
//! Defines the canonical table of monitored river parameters along with their
//! units and public-safety threshold rules. This is the single source of
//! truth for threshold limits and alert display names; all other modules
//! should reference rules from here rather than hardcoding limits.

use crate::model::{Parameter, ThresholdCondition, ThresholdRule};

// ---------------------------------------------------------------------------
// Parameter metadata
// ---------------------------------------------------------------------------

/// Registry row for a single monitored parameter.
pub struct ParameterSpec {
    /// The parameter this row describes.
    pub parameter: Parameter,
    /// Measurement unit, as published in reports.
    pub unit: &'static str,
    /// Human-readable description of the parameter's role in river monitoring.
    pub description: &'static str,
    /// Public-safety threshold rule, if one is defined.
    /// Hydrological context parameters carry no rule of their own.
    pub threshold: Option<ThresholdRule>,
}

/// All monitored parameters at the Varanasi station, in forecast order.
///
/// Sources:
///   - Danger level: CWC flood bulletin for Varanasi (~72.5 m)
///   - Quality limits: CPCB bathing-water criteria for the Ganga
pub static PARAMETER_REGISTRY: &[ParameterSpec] = &[
    ParameterSpec {
        parameter: Parameter::Rainfall,
        unit: "mm",
        description: "Daily accumulated rainfall over the upstream catchment. \
                      Drives runoff and dilution; carries no alert rule of its own.",
        threshold: None,
    },
    ParameterSpec {
        parameter: Parameter::WaterLevel,
        unit: "m",
        description: "River stage at the Varanasi gauge. Crossing the danger \
                      level floods the lower ghats, so this rule is the only \
                      flood-critical one.",
        threshold: Some(ThresholdRule {
            limit: 72.5,
            condition: ThresholdCondition::Above,
            display_name: "Ganga Water Level",
        }),
    },
    ParameterSpec {
        parameter: Parameter::Flow,
        unit: "m³/s",
        description: "Discharge at the gauge cross-section. Context for the \
                      quality parameters; no alert rule.",
        threshold: None,
    },
    ParameterSpec {
        parameter: Parameter::Temperature,
        unit: "°C",
        description: "Water temperature. Sustained warm water depresses \
                      dissolved oxygen and accelerates organic decay.",
        threshold: Some(ThresholdRule {
            limit: 30.0,
            condition: ThresholdCondition::Above,
            display_name: "Water Temperature",
        }),
    },
    ParameterSpec {
        parameter: Parameter::DissolvedOxygen,
        unit: "mg/L",
        description: "Dissolved oxygen. The one parameter where *low* values \
                      are dangerous; below 5 mg/L aquatic life is under stress.",
        threshold: Some(ThresholdRule {
            limit: 5.0,
            condition: ThresholdCondition::Below,
            display_name: "Dissolved Oxygen (DO)",
        }),
    },
    ParameterSpec {
        parameter: Parameter::Bod,
        unit: "mg/L",
        description: "Biochemical oxygen demand. High BOD indicates organic \
                      pollution load, typically from sewage outflow.",
        threshold: Some(ThresholdRule {
            limit: 8.0,
            condition: ThresholdCondition::Above,
            display_name: "Biochemical Oxygen Demand (BOD)",
        }),
    },
    ParameterSpec {
        parameter: Parameter::Nitrate,
        unit: "mg/L",
        description: "Nitrate concentration. Elevated nitrate points at \
                      fertilizer runoff from the agricultural belt upstream.",
        threshold: Some(ThresholdRule {
            limit: 10.0,
            condition: ThresholdCondition::Above,
            display_name: "Nitrate",
        }),
    },
    ParameterSpec {
        parameter: Parameter::FecalColiform,
        unit: "MPN/100ml",
        description: "Fecal coliform count. The bathing-water criterion is the \
                      hard ceiling; beyond it the water is unsafe for ritual use.",
        threshold: Some(ThresholdRule {
            limit: 20_000.0,
            condition: ThresholdCondition::Above,
            display_name: "Fecal Coliform",
        }),
    },
];

/// Looks up the registry row for a parameter.
///
/// Rows are declared in `Parameter::ALL` order, which the registry tests pin,
/// so this is a total lookup.
pub fn spec_for(parameter: Parameter) -> &'static ParameterSpec {
    &PARAMETER_REGISTRY[parameter as usize]
}

/// Returns the threshold rule for a parameter, if one is defined.
pub fn threshold_rule(parameter: Parameter) -> Option<&'static ThresholdRule> {
    spec_for(parameter).threshold.as_ref()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

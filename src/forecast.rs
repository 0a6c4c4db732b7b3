//! Forecast engine: runs every loaded predictor over its trailing history
//! window and publishes rounded three-day forecasts.

use std::collections::BTreeMap;

use crate::history::HistoryStore;
use crate::model::{ForecastError, ForecastWindow, Parameter};
use crate::predict::{Predictor, PredictorRegistry};

/// Forecasts a single parameter from its most recent history window.
pub fn forecast_parameter(
    parameter: Parameter,
    predictor: &dyn Predictor,
    history: &HistoryStore,
) -> Result<ForecastWindow, ForecastError> {
    let window = history.last_window(parameter)?;
    let raw = predictor
        .predict(&window)
        .map_err(|detail| ForecastError::PredictorFailure { parameter, detail })?;
    Ok(ForecastWindow::from_raw(raw))
}

/// Runs one full forecast cycle over every predictor in the registry, in
/// canonical parameter order.
///
/// All or nothing: if any parameter cannot be forecast the whole cycle fails,
/// because a report missing a parameter would read as an all-clear for it.
pub fn forecast_all(
    registry: &PredictorRegistry,
    history: &HistoryStore,
) -> Result<BTreeMap<Parameter, ForecastWindow>, ForecastError> {
    let mut forecasts = BTreeMap::new();
    for (parameter, predictor) in registry.iter() {
        let window = forecast_parameter(parameter, predictor, history)?;
        forecasts.insert(parameter, window);
    }
    Ok(forecasts)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FORECAST_HORIZON, HISTORY_WINDOW};
    use chrono::{Duration, NaiveDate};

    /// Always predicts the same raw values.
    struct Fixed([f64; FORECAST_HORIZON]);

    impl Predictor for Fixed {
        fn predict(
            &self,
            _window: &[f64; HISTORY_WINDOW],
        ) -> Result<[f64; FORECAST_HORIZON], String> {
            Ok(self.0)
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    /// Repeats the newest observation across the horizon.
    struct Echo;

    impl Predictor for Echo {
        fn predict(
            &self,
            window: &[f64; HISTORY_WINDOW],
        ) -> Result<[f64; FORECAST_HORIZON], String> {
            Ok([window[HISTORY_WINDOW - 1]; FORECAST_HORIZON])
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    struct Failing;

    impl Predictor for Failing {
        fn predict(
            &self,
            _window: &[f64; HISTORY_WINDOW],
        ) -> Result<[f64; FORECAST_HORIZON], String> {
            Err("numerical blowup".to_string())
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn history(rows: usize) -> HistoryStore {
        let mut csv = String::from(
            "date,rainfall_mm,water_level_meters,flow_m3_s,temperature_celsius,\
             do_mg_L,bod_mg_L,nitrate_mg_L,fecal_coliform_mpn_100ml\n",
        );
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        for i in 0..rows {
            let date = start + Duration::days(i as i64);
            csv.push_str(&format!(
                "{},1.0,{:.1},1500.0,27.0,6.0,4.5,5.5,11000.0\n",
                date,
                70.0 + i as f64 * 0.1,
            ));
        }
        HistoryStore::from_reader(csv.as_bytes()).unwrap()
    }

    fn registry_of(build: impl Fn(Parameter) -> Box<dyn Predictor>) -> PredictorRegistry {
        let models = Parameter::ALL
            .into_iter()
            .map(|p| (p, build(p)))
            .collect::<BTreeMap<_, _>>();
        PredictorRegistry::from_models(models)
    }

    #[test]
    fn test_forecast_output_is_rounded_to_two_decimals() {
        let history = history(10);
        let forecast =
            forecast_parameter(Parameter::WaterLevel, &Fixed([71.006, 70.0049, 69.95]), &history)
                .unwrap();
        assert_eq!(forecast.values(), &[71.01, 70.0, 69.95]);
    }

    #[test]
    fn test_forecast_consumes_the_trailing_window() {
        // 14 rows of climbing water level; Echo repeats the newest value, so
        // the forecast proves the window ends at the last observation.
        let history = history(14);
        let forecast = forecast_parameter(Parameter::WaterLevel, &Echo, &history).unwrap();
        assert_eq!(forecast.values(), &[71.3, 71.3, 71.3]);
    }

    #[test]
    fn test_cycle_covers_every_parameter_in_order() {
        let history = history(10);
        let registry = registry_of(|_| Box::new(Fixed([1.0, 2.0, 3.0])));

        let forecasts = forecast_all(&registry, &history).unwrap();
        let order: Vec<_> = forecasts.keys().copied().collect();
        assert_eq!(order, Parameter::ALL.to_vec());
    }

    #[test]
    fn test_one_failing_predictor_fails_the_cycle() {
        let history = history(10);
        let registry = registry_of(|p| {
            if p == Parameter::Nitrate {
                Box::new(Failing)
            } else {
                Box::new(Fixed([1.0, 1.0, 1.0]))
            }
        });

        assert_eq!(
            forecast_all(&registry, &history).unwrap_err(),
            ForecastError::PredictorFailure {
                parameter: Parameter::Nitrate,
                detail: "numerical blowup".to_string(),
            }
        );
    }

    #[test]
    fn test_short_history_fails_the_cycle() {
        let history = history(9);
        let registry = registry_of(|_| Box::new(Fixed([1.0, 1.0, 1.0])));

        assert_eq!(
            forecast_all(&registry, &history).unwrap_err(),
            ForecastError::ShortHistory {
                parameter: Parameter::Rainfall,
                required: HISTORY_WINDOW,
                available: 9,
            }
        );
    }

    #[test]
    fn test_cycle_follows_the_loaded_model_set() {
        // A deliberately partial registry (test construction only) forecasts
        // exactly what it holds.
        let history = history(10);
        let mut models: BTreeMap<Parameter, Box<dyn Predictor>> = BTreeMap::new();
        models.insert(Parameter::Bod, Box::new(Fixed([4.0, 4.1, 4.2])));
        models.insert(Parameter::WaterLevel, Box::new(Echo));
        let registry = PredictorRegistry::from_models(models);

        let forecasts = forecast_all(&registry, &history).unwrap();
        assert_eq!(forecasts.len(), 2);
        assert!(forecasts.contains_key(&Parameter::Bod));
        assert!(forecasts.contains_key(&Parameter::WaterLevel));
    }
}

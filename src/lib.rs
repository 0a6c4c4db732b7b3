//! Multi-parameter river forecasting and public-safety alerting for the
//! Ganga at Varanasi.
//!
//! The crate is organized as a pipeline: [`history`] loads the observation
//! record, [`predict`] turns trained model artifacts into per-parameter
//! predictors, [`forecast`] runs every predictor over the trailing window,
//! [`alert`] applies the threshold rules and pollution-source inference, and
//! [`report`] assembles the JSON/console output. [`server`] exposes the
//! whole cycle over HTTP.

pub mod alert;
pub mod config;
pub mod context;
pub mod forecast;
pub mod history;
pub mod model;
pub mod parameters;
pub mod pipeline;
pub mod predict;
pub mod report;
pub mod server;

//! Oil spill incident logging service.
//!
//! Incidents are submitted over HTTP, appended to a single JSON document and
//! served back as lists, detail views and aggregate counts.

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod state;

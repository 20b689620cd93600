// Config module for antagning-tui
// Resolves remote endpoints from the environment

pub mod config;

pub use config::{init_endpoints, Endpoints, DEFAULT_ADMISSIONS_URL, DEFAULT_NOMINATIM_URL};

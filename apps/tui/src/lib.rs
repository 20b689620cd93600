// Export our modules for use in binaries and tests
pub mod api;
pub mod config;
pub mod domain;
pub mod map;

pub use domain::{Category, RankedDataset};

//! Daily statistics and per-patient normalization of inflammation data.
//!
//! The numeric core ([`data`], [`models`]) works on plain
//! [`ndarray`] tables with one row per patient and one column per day.
//! [`study`] drives it over a directory of CSV files.

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod report;
pub mod study;

pub use data::{Matrix, load_matrix, save_matrix};
pub use error::{Error, ParseError, Result};
pub use models::{
    Vector, daily_max, daily_mean, daily_min, daily_std, exceeds_threshold, normalize_patient,
};

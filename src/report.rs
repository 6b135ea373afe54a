//! Per-file summaries written by the study driver.

use crate::error::Result;
use crate::models::{Vector, daily_max, daily_mean, daily_min, daily_std, exceeds_threshold};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Daily statistics across all patients, one value per day.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub mean: Vector,
    pub max: Vector,
    pub min: Vector,
    pub std_dev: Vector,
}

/// Threshold crossings of a single patient.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CrossingReport {
    pub patient: usize,
    pub exceeded: Vec<bool>,
    pub n_days_exceeded: usize,
}

/// Summary of a single inflammation table.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub file: String,
    pub n_patients: usize,
    pub n_days: usize,
    pub threshold: f64,
    pub daily: DailyReport,
    pub crossings: Vec<CrossingReport>,
}

impl Report {
    /// Compute the daily statistics of `data` and the threshold crossings
    /// of each patient in `patients`.
    pub fn new(
        file: &str,
        data: ArrayView2<f64>,
        threshold: f64,
        patients: &[usize],
    ) -> Result<Self> {
        let daily = DailyReport {
            mean: daily_mean(data)?,
            max: daily_max(data)?,
            min: daily_min(data)?,
            std_dev: daily_std(data)?,
        };

        let crossings = patients
            .iter()
            .map(|&patient| {
                let exceeded = exceeds_threshold(data, threshold, patient)?;
                let n_days_exceeded = exceeded.iter().filter(|&&flag| flag).count();
                Ok(CrossingReport {
                    patient,
                    exceeded,
                    n_days_exceeded,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            file: file.to_string(),
            n_patients: data.nrows(),
            n_days: data.ncols(),
            threshold,
            daily,
            crossings,
        })
    }
}

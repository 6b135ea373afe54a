//! Statistics of inflammation tables.
//!
//! Each table holds one row per patient and one column per day. The daily
//! functions reduce over patients, giving one value per day.

use crate::data::Matrix;
use crate::error::{Error, Result};
use ndarray::{Array1, ArrayView2, Axis};

/// One value per day.
pub type Vector = Array1<f64>;

/// Compute the daily mean across all patients.
pub fn daily_mean(data: ArrayView2<f64>) -> Result<Vector> {
    check_non_empty(data)?;
    data.mean_axis(Axis(0))
        .ok_or_else(|| Error::InvalidInput("matrix has no patients".to_string()))
}

/// Compute the daily maximum across all patients.
pub fn daily_max(data: ArrayView2<f64>) -> Result<Vector> {
    check_non_empty(data)?;
    Ok(fold_days(data, f64::NEG_INFINITY, f64::max))
}

/// Compute the daily minimum across all patients.
pub fn daily_min(data: ArrayView2<f64>) -> Result<Vector> {
    check_non_empty(data)?;
    Ok(fold_days(data, f64::INFINITY, f64::min))
}

/// Compute the daily population standard deviation across all patients.
pub fn daily_std(data: ArrayView2<f64>) -> Result<Vector> {
    check_non_empty(data)?;
    Ok(data.std_axis(Axis(0), 0.0))
}

/// Normalize every patient row by its maximum.
///
/// The row maximum ignores NaN entries. Entries that end up NaN after the
/// division (NaN inputs, `0 / 0`, rows with no finite maximum) are set to
/// `0.0`, as is any negative result.
///
/// # Errors
/// Returns [`Error::InvalidInput`] if any entry is negative.
pub fn normalize_patient(data: ArrayView2<f64>) -> Result<Matrix> {
    if let Some(val) = data.iter().find(|&&val| val < 0.0) {
        return Err(Error::InvalidInput(format!(
            "inflammation values must be non-negative, but found {val}"
        )));
    }

    let mut norm = data.to_owned();
    for mut row in norm.rows_mut() {
        let max = row
            .iter()
            .filter(|val| !val.is_nan())
            .fold(f64::NAN, |acc, &val| acc.max(val));

        row.mapv_inplace(|val| {
            let val = val / max;
            if val.is_nan() || val < 0.0 { 0.0 } else { val }
        });
    }

    Ok(norm)
}

/// Flag the days on which a patient's value strictly exceeds `threshold`.
///
/// # Errors
/// Returns [`Error::IndexOutOfRange`] if `patient` is not a row of `data`.
pub fn exceeds_threshold(
    data: ArrayView2<f64>,
    threshold: f64,
    patient: usize,
) -> Result<Vec<bool>> {
    let n_patients = data.nrows();
    if patient >= n_patients {
        return Err(Error::IndexOutOfRange {
            index: patient,
            n_patients,
        });
    }

    Ok(data.row(patient).iter().map(|&val| val > threshold).collect())
}

fn check_non_empty(data: ArrayView2<f64>) -> Result<()> {
    let (n_patients, n_days) = data.dim();
    if n_patients == 0 || n_days == 0 {
        return Err(Error::InvalidInput(format!(
            "matrix must be non-empty, but has shape ({n_patients}, {n_days})"
        )));
    }
    Ok(())
}

// NaN propagates, `f64::max` and `f64::min` alone would skip it.
fn fold_days(data: ArrayView2<f64>, init: f64, pick: fn(f64, f64) -> f64) -> Vector {
    data.fold_axis(Axis(0), init, |&acc, &val| {
        if acc.is_nan() || val.is_nan() {
            f64::NAN
        } else {
            pick(acc, val)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    fn sample() -> Matrix {
        array![
            [0.0, 1.0, 3.0, 2.0],
            [4.0, 0.0, 5.0, 7.0],
            [1.0, 2.5, 0.5, 9.0],
        ]
    }

    #[test]
    fn daily_mean_of_zeros() {
        let data = Array2::<f64>::zeros((3, 3));
        assert_eq!(daily_mean(data.view()).unwrap(), array![0.0, 0.0, 0.0]);
    }

    #[test]
    fn daily_mean_of_integers() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        assert_eq!(daily_mean(data.view()).unwrap(), array![3.0, 4.0]);
    }

    #[test]
    fn daily_max_and_min() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        assert_eq!(daily_max(data.view()).unwrap(), array![5.0, 6.0]);
        assert_eq!(daily_min(data.view()).unwrap(), array![1.0, 2.0]);
    }

    #[test]
    fn daily_std_divides_by_n() {
        let data = array![[1.0, 2.0], [3.0, 2.0]];
        let std = daily_std(data.view()).unwrap();
        assert_abs_diff_eq!(std[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(std[1], 0.0, epsilon = 1e-12);

        let data = array![[2.0], [4.0], [4.0], [4.0], [5.0], [5.0], [7.0], [9.0]];
        assert_abs_diff_eq!(daily_std(data.view()).unwrap()[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn daily_stats_are_ordered() {
        let data = sample();
        let mean = daily_mean(data.view()).unwrap();
        let max = daily_max(data.view()).unwrap();
        let min = daily_min(data.view()).unwrap();

        assert_eq!(mean.len(), data.ncols());
        assert_eq!(max.len(), data.ncols());
        assert_eq!(min.len(), data.ncols());
        for j in 0..data.ncols() {
            assert!(min[j] <= mean[j] && mean[j] <= max[j], "day {j}");
        }
    }

    #[test]
    fn daily_max_propagates_nan() {
        let data = array![[1.0, f64::NAN], [3.0, 4.0]];
        let max = daily_max(data.view()).unwrap();
        assert_eq!(max[0], 3.0);
        assert!(max[1].is_nan());
    }

    #[test]
    fn daily_stats_reject_empty() {
        for data in [Array2::<f64>::zeros((0, 3)), Array2::<f64>::zeros((3, 0))] {
            assert!(matches!(daily_mean(data.view()), Err(Error::InvalidInput(_))));
            assert!(matches!(daily_max(data.view()), Err(Error::InvalidInput(_))));
            assert!(matches!(daily_min(data.view()), Err(Error::InvalidInput(_))));
            assert!(matches!(daily_std(data.view()), Err(Error::InvalidInput(_))));
        }
    }

    #[test]
    fn normalize_divides_by_row_max() {
        let data = array![[1.0, 2.0, 4.0], [3.0, 6.0, 0.0]];
        let norm = normalize_patient(data.view()).unwrap();
        assert_eq!(norm, array![[0.25, 0.5, 1.0], [0.5, 1.0, 0.0]]);
        assert_eq!(data[[0, 2]], 4.0);
    }

    #[test]
    fn normalize_zeroes_nan() {
        let data = array![
            [0.0, 0.0, 0.0],
            [f64::NAN, 2.0, 1.0],
            [f64::NAN, f64::NAN, f64::NAN],
        ];
        let norm = normalize_patient(data.view()).unwrap();
        assert_eq!(norm, array![[0.0, 0.0, 0.0], [0.0, 1.0, 0.5], [0.0, 0.0, 0.0]]);
    }

    #[test]
    fn normalize_output_is_clean() {
        let norm = normalize_patient(sample().view()).unwrap();
        assert_eq!(norm.dim(), sample().dim());
        assert!(norm.iter().all(|&val| !val.is_nan() && val >= 0.0));
    }

    #[test]
    fn normalize_is_idempotent() {
        let data = array![[0.5, 1.0, 0.0], [1.0, 0.2, 0.7]];
        assert_eq!(normalize_patient(data.view()).unwrap(), data);

        let once = normalize_patient(array![[2.0, 4.0], [5.0, 1.0]].view()).unwrap();
        assert_eq!(normalize_patient(once.view()).unwrap(), once);
    }

    #[test]
    fn normalize_rejects_negative() {
        let data = array![[1.0, -2.0], [3.0, 4.0]];
        assert!(matches!(
            normalize_patient(data.view()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn threshold_flags_strict_crossings() {
        let data = array![[1.0, 5.0, 3.0]];
        assert_eq!(
            exceeds_threshold(data.view(), 2.0, 0).unwrap(),
            vec![false, true, true]
        );
        assert_eq!(
            exceeds_threshold(data.view(), 3.0, 0).unwrap(),
            vec![false, true, false]
        );
    }

    #[test]
    fn threshold_rejects_bad_patient() {
        let data = Array2::<f64>::ones((3, 4));
        assert!(matches!(
            exceeds_threshold(data.view(), 2.0, 5),
            Err(Error::IndexOutOfRange {
                index: 5,
                n_patients: 3
            })
        ));
        assert!(exceeds_threshold(data.view(), 2.0, 3).is_err());
    }
}

//! Reading and writing inflammation tables.
//!
//! Tables are plain comma-separated text without a header:
//! one row per patient, one column per day.

use crate::error::{Error, ParseError, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use ndarray::{Array2, ArrayView2};
use std::path::Path;

/// Inflammation table, rows are patients and columns are days.
pub type Matrix = Array2<f64>;

/// Load a [`Matrix`] from a CSV file.
///
/// Every row must have the same number of fields and every field must parse
/// as a floating-point number. Lines starting with `#` and blank lines are
/// skipped. An empty file yields a `0 x 0` matrix.
///
/// # Errors
/// Returns [`Error::Parse`] if the file cannot be read, a field is not
/// numeric or the row lengths differ.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();
    let read_err = |source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(read_err)?;

    let mut vals = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = None;

    for (i_row, record) in reader.records().enumerate() {
        let record = record.map_err(read_err)?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }

        let len = record.len();
        match n_cols {
            None => n_cols = Some(len),
            Some(exp_len) if exp_len != len => {
                return Err(ParseError::RowLength {
                    row: i_row,
                    len,
                    exp_len,
                }
                .into());
            }
            Some(_) => {}
        }

        for (i_col, field) in record.iter().enumerate() {
            let val = field.parse::<f64>().map_err(|source| ParseError::Field {
                row: i_row,
                col: i_col,
                field: field.to_string(),
                source,
            })?;
            vals.push(val);
        }
        n_rows += 1;
    }

    let dim = (n_rows, n_cols.unwrap_or(0));
    let mat =
        Array2::from_shape_vec(dim, vals).map_err(|err| Error::InvalidInput(err.to_string()))?;
    log::debug!("loaded {path:?} with shape {:?}", mat.dim());

    Ok(mat)
}

/// Save a matrix to a CSV file in the format read by [`load_matrix`].
///
/// # Errors
/// Returns [`Error::Write`] if the file cannot be created or written.
pub fn save_matrix<P: AsRef<Path>>(path: P, mat: ArrayView2<f64>) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_err)?;

    for row in mat.rows() {
        writer
            .write_record(row.iter().map(|val| val.to_string()))
            .map_err(write_err)?;
    }

    writer.flush().map_err(|err| write_err(err.into()))?;
    log::debug!("saved {path:?} with shape {:?}", mat.dim());

    Ok(())
}

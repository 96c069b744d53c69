//! Shape validation ahead of any compute or communication.

use crate::Error;
use crate::matrix::{Element, Matrix};

/// Pure predicate over the operand dimensions.
///
/// Accepts iff the inner dimensions agree, every extent is positive, and
/// every extent and product extent fits the signed index type used for strip
/// arithmetic. Nothing downstream of a successful validation re-checks
/// shapes.
pub fn dims_valid(a_rows: usize, a_cols: usize, b_rows: usize, b_cols: usize) -> bool {
    if a_rows == 0 || a_cols == 0 || b_rows == 0 || b_cols == 0 {
        return false;
    }
    if a_cols != b_rows {
        return false;
    }
    [a_rows, a_cols, b_rows, b_cols].iter().all(|&n| fits(n))
        && fits_product(a_rows, a_cols)
        && fits_product(b_rows, b_cols)
        && fits_product(a_rows, b_cols)
}

fn fits(n: usize) -> bool {
    i64::try_from(n).is_ok()
}

fn fits_product(a: usize, b: usize) -> bool {
    (a as u128) * (b as u128) <= i64::MAX as u128
}

/// `Result`-shaped wrapper around [`dims_valid`] for the engine entry points.
pub fn check<E: Element>(a: &Matrix<E>, b: &Matrix<E>) -> Result<(), Error> {
    if dims_valid(a.rows(), a.cols(), b.rows(), b.cols()) {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            a_rows: a.rows(),
            a_cols: a.cols(),
            b_rows: b.rows(),
            b_cols: b.cols(),
        })
    }
}

//! Small dense-algebra helpers.
//!
//! Every estimator in the bundle is either an affine map
//!
//! ```text
//! y = W x + b
//! ```
//!
//! or a tree walk whose leaves hold small vectors that we average. Both cases are
//! covered by the helpers below.

use nalgebra::{DMatrix, DVector};

/// Build a row-major matrix from nested rows.
///
/// Returns `None` if the rows are ragged or there are no columns.
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Option<DMatrix<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map(Vec::len)?;
    if n_cols == 0 || rows.iter().any(|r| r.len() != n_cols) {
        return None;
    }
    let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Some(DMatrix::from_row_slice(n_rows, n_cols, &flat))
}

/// Evaluate `W x + b`.
///
/// # Panics
/// Panics if the shapes do not line up. Estimators validate shapes at load time.
pub fn affine(weights: &DMatrix<f64>, bias: &DVector<f64>, x: &DVector<f64>) -> DVector<f64> {
    weights * x + bias
}

/// Index of the largest value; ties resolve to the first index.
///
/// Returns `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Scale `values` so they sum to one. All-zero input is left unchanged.
pub fn normalize_in_place(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        for v in values.iter_mut() {
            *v /= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affine_matches_hand_computation() {
        // y0 = 1*x0 + 2*x1 + 0.5, y1 = -x0 + 3*x1 - 1
        let w = matrix_from_rows(&[vec![1.0, 2.0], vec![-1.0, 3.0]]).unwrap();
        let b = DVector::from_row_slice(&[0.5, -1.0]);
        let x = DVector::from_row_slice(&[2.0, 1.0]);

        let y = affine(&w, &b, &x);
        assert!((y[0] - 4.5).abs() < 1e-12);
        assert!((y[1] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matrix_from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_none());
        assert!(matrix_from_rows(&[]).is_none());
        assert!(matrix_from_rows(&[vec![]]).is_none());
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn normalize_leaves_zero_vectors_alone() {
        let mut v = [0.0, 0.0];
        normalize_in_place(&mut v);
        assert_eq!(v, [0.0, 0.0]);

        let mut w = [1.0, 3.0];
        normalize_in_place(&mut w);
        assert!((w[0] - 0.25).abs() < 1e-12);
    }
}

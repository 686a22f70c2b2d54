//! Dense linear solver for the polynomial normal equations.
//!
//! The system is passed as an augmented `k x (k+1)` matrix: the first `k`
//! columns hold the coefficients and the last column the right-hand side.
//!
//! Numerical notes:
//! - Partial pivoting on absolute value. For pivot column `i` the candidates
//!   are rows `i+1 .. k-1`, compared against row `i`; the swap covers columns
//!   `i ..= k`. Results on ill-conditioned systems depend on these bounds.
//! - No singularity check. A zero pivot yields `NaN`/`Infinity` in the output
//!   and callers are expected to inspect the coefficients themselves.

use nalgebra::DMatrix;

/// Solve an augmented system by Gaussian elimination with partial pivoting.
///
/// Returns a vector of length `unknowns`. Entries that the system does not
/// determine (when `unknowns` exceeds the row count) are `NaN`.
pub fn gaussian_elimination(mut a: DMatrix<f64>, unknowns: usize) -> Vec<f64> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n + 1, "augmented matrix must have k+1 columns");

    for i in 0..n {
        let mut max_row = i;
        for j in (i + 1)..n {
            if a[(j, i)].abs() > a[(max_row, i)].abs() {
                max_row = j;
            }
        }

        if max_row != i {
            for k in i..=n {
                a.swap((i, k), (max_row, k));
            }
        }

        for j in (i + 1)..n {
            // Walk right-to-left so the multiplier column `i` is read before it is zeroed.
            for k in (i..=n).rev() {
                let delta = a[(i, k)] * a[(j, i)] / a[(i, i)];
                a[(j, k)] -= delta;
            }
        }
    }

    let mut x = vec![f64::NAN; unknowns];
    for j in (0..n.min(unknowns)).rev() {
        let mut tmp = 0.0;
        for k in (j + 1)..n.min(unknowns) {
            tmp += a[(j, k)] * x[k];
        }
        x[j] = (a[(j, n)] - tmp) / a[(j, j)];
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_small_system() {
        // 2a + b = 5, a + 3b = 10  =>  a = 1, b = 3
        let a = DMatrix::from_row_slice(2, 3, &[2.0, 1.0, 5.0, 1.0, 3.0, 10.0]);
        let x = gaussian_elimination(a, 2);
        assert_eq!(x.len(), 2);
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn pivots_past_a_zero_leading_entry() {
        // 0a + b = 2, a + b = 3  =>  a = 1, b = 2
        let a = DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 2.0, 1.0, 1.0, 3.0]);
        let x = gaussian_elimination(a, 2);
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn three_by_three() {
        // x + y + z = 6, 2y + 5z = -4, 2x + 5y - z = 27  =>  (5, 3, -2)
        let a = DMatrix::from_row_slice(
            3,
            4,
            &[1.0, 1.0, 1.0, 6.0, 0.0, 2.0, 5.0, -4.0, 2.0, 5.0, -1.0, 27.0],
        );
        let x = gaussian_elimination(a, 3);
        assert!((x[0] - 5.0).abs() < 1e-9);
        assert!((x[1] - 3.0).abs() < 1e-9);
        assert!((x[2] + 2.0).abs() < 1e-9);
    }

    #[test]
    fn pivot_is_chosen_from_all_remaining_rows() {
        // Column 0 is tiny in rows 0 and 1; only row 2 is a usable pivot.
        // Picking the larger of rows 0/1 loses `a` to cancellation (a = 0).
        let a = DMatrix::from_row_slice(
            3,
            4,
            &[1e-20, 1.0, 0.0, 1.0, 1e-18, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 3.0],
        );
        let x = gaussian_elimination(a, 3);
        for v in x {
            assert!((v - 1.0).abs() < 1e-9, "{v}");
        }
    }

    #[test]
    fn singular_system_propagates_non_finite() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0]);
        let x = gaussian_elimination(a, 2);
        assert!(x.iter().any(|v| !v.is_finite()));
    }
}

//! Dense LU factorization with partial pivoting.
//!
//! The assembled systems are small and dense (one row per unknown), so a
//! textbook in-place LU with row pivoting is the whole kernel. A pivot
//! below machine epsilon scaled by the matrix magnitude means the system
//! has no unique solution.

/// LU factors of a square matrix, stored packed in row-major order with the
/// unit lower triangle below the diagonal.
#[derive(Debug)]
pub struct LuFactors {
    lu: Vec<f64>,
    pivots: Vec<usize>,
    n: usize,
}

/// Factor an `n`-by-`n` row-major matrix. Returns `None` when the matrix is
/// singular to working precision.
pub fn factor(a: &[f64], n: usize) -> Option<LuFactors> {
    debug_assert_eq!(a.len(), n * n);

    let mut lu = a.to_vec();
    let mut pivots: Vec<usize> = (0..n).collect();

    // Pivot threshold scaled by the largest entry; an all-zero matrix
    // fails the very first pivot search.
    let norm = a.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let tolerance = n as f64 * f64::EPSILON * norm;

    for k in 0..n {
        let mut max_val = lu[k * n + k].abs();
        let mut max_row = k;
        for i in (k + 1)..n {
            let val = lu[i * n + k].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val <= tolerance {
            return None;
        }

        if max_row != k {
            pivots.swap(k, max_row);
            for j in 0..n {
                lu.swap(k * n + j, max_row * n + j);
            }
        }

        let pivot = lu[k * n + k];
        for i in (k + 1)..n {
            let factor = lu[i * n + k] / pivot;
            lu[i * n + k] = factor;
            for j in (k + 1)..n {
                lu[i * n + j] -= factor * lu[k * n + j];
            }
        }
    }

    Some(LuFactors { lu, pivots, n })
}

impl LuFactors {
    /// Solve `Ax = b` using the stored factors. Pivots are nonzero by
    /// construction, so substitution cannot fail.
    pub fn solve(&self, b: &[f64]) -> Vec<f64> {
        let n = self.n;
        debug_assert_eq!(b.len(), n);

        // Apply the pivot permutation to b.
        let mut x: Vec<f64> = (0..n).map(|i| b[self.pivots[i]]).collect();

        // Forward substitution (L y = Pb, unit diagonal).
        for i in 0..n {
            for j in 0..i {
                x[i] -= self.lu[i * n + j] * x[j];
            }
        }

        // Back substitution (U x = y).
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= self.lu[i * n + j] * x[j];
            }
            x[i] /= self.lu[i * n + i];
        }

        x
    }
}

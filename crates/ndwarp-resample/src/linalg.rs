//! Small dense linear algebra used to set up transforms.

/// Inverts a square matrix given in row-major `m[row][col]` form.
///
/// Uses Gauss-Jordan elimination with partial pivoting. Returns `None` when a pivot
/// falls below `1e-12` times the largest absolute entry of `m`, or when `m` holds a
/// non-finite entry.
///
/// # Example
///
/// ```
/// use ndwarp_resample::linalg::invert_matrix;
///
/// let m = [[2.0, 0.0], [0.0, 4.0]];
/// assert_eq!(invert_matrix(&m), Some([[0.5, 0.0], [0.0, 0.25]]));
/// ```
pub fn invert_matrix<const N: usize>(m: &[[f64; N]; N]) -> Option<[[f64; N]; N]> {
    if m.iter().flatten().any(|v| !v.is_finite()) {
        return None;
    }
    let scale = m.iter().flatten().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return None;
    }
    let tolerance = scale * 1e-12;

    let mut a = *m;
    let mut inv = [[0.0; N]; N];
    for (i, row) in inv.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for col in 0..N {
        let pivot_row =
            (col..N).max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))?;
        if a[pivot_row][col].abs() <= tolerance {
            return None;
        }
        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let pivot = a[col][col];
        for k in 0..N {
            a[col][k] /= pivot;
            inv[col][k] /= pivot;
        }

        for row in 0..N {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for k in 0..N {
                a[row][k] -= factor * a[col][k];
                inv[row][k] -= factor * inv[col][k];
            }
        }
    }
    Some(inv)
}

/// Returns `m · v`.
pub fn mat_vec<const N: usize>(m: &[[f64; N]; N], v: &[f64; N]) -> [f64; N] {
    let mut out = [0.0; N];
    for (o, row) in out.iter_mut().zip(m) {
        *o = row.iter().zip(v).map(|(a, b)| a * b).sum();
    }
    out
}

// crates/socsem-drift/src/linalg.rs
//
// Singular value decomposition of small square matrices.
//
// Procrustes alignment only ever decomposes a D x D cross-covariance matrix
// (D = embedding dimensionality, a few hundred at most), so a one-sided
// Jacobi sweep over ndarray matrices is accurate and fast enough.

use ndarray::{Array1, Array2};

use socsem_core::SocsemError;

/// Upper bound on Jacobi sweeps; convergence is quadratic, so this is never hit
/// on finite input.
const MAX_SWEEPS: usize = 100;

/// Columns whose normalised inner product is below this are treated as orthogonal.
const ORTHOGONALITY_TOLERANCE: f64 = 1e-12;

/// Factorisation `a = u . diag(singular_values) . vt`.
#[derive(Debug, Clone)]
pub struct Svd {
    /// Orthogonal matrix of left singular vectors (columns).
    pub u: Array2<f64>,
    /// Non-negative singular values, in column order of `u` (not sorted).
    pub singular_values: Array1<f64>,
    /// Transposed orthogonal matrix of right singular vectors.
    pub vt: Array2<f64>,
}

/// Decompose a square matrix with one-sided (Hestenes) Jacobi rotations.
///
/// Left singular vectors of zero singular values are completed to an
/// orthonormal basis, so `u` is always orthogonal.
pub fn svd(a: &Array2<f64>) -> Result<Svd, SocsemError> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(SocsemError::InvalidInput(format!(
            "svd expects a square matrix, got {}x{}",
            rows, cols
        )));
    }
    if a.iter().any(|x| !x.is_finite()) {
        return Err(SocsemError::DegenerateAlignment(
            "matrix contains non-finite values".to_string(),
        ));
    }

    let n = rows;
    let mut u = a.clone();
    let mut v = Array2::<f64>::eye(n);

    let mut converged = false;
    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;
        for p in 0..n {
            for q in (p + 1)..n {
                let mut alpha = 0.0;
                let mut beta = 0.0;
                let mut gamma = 0.0;
                for i in 0..n {
                    let up = u[[i, p]];
                    let uq = u[[i, q]];
                    alpha += up * up;
                    beta += uq * uq;
                    gamma += up * uq;
                }

                let scale = (alpha * beta).sqrt();
                if scale == 0.0 || gamma.abs() <= ORTHOGONALITY_TOLERANCE * scale {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;

                rotate_columns(&mut u, p, q, c, s);
                rotate_columns(&mut v, p, q, c, s);
            }
        }
        if !rotated {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(SocsemError::DegenerateAlignment(
            "singular value decomposition did not converge".to_string(),
        ));
    }

    let singular_values: Array1<f64> = (0..n)
        .map(|j| u.column(j).iter().map(|x| x * x).sum::<f64>().sqrt())
        .collect();
    let largest = singular_values.iter().cloned().fold(0.0_f64, f64::max);
    let cutoff = largest * n as f64 * f64::EPSILON;

    let mut deficient = Vec::new();
    for j in 0..n {
        let sigma = singular_values[j];
        if sigma > cutoff && sigma > 0.0 {
            u.column_mut(j).mapv_inplace(|x| x / sigma);
        } else {
            deficient.push(j);
        }
    }
    complete_basis(&mut u, &deficient);

    Ok(Svd {
        u,
        singular_values,
        vt: v.t().to_owned(),
    })
}

/// Apply the plane rotation (c, s) to columns p and q.
fn rotate_columns(m: &mut Array2<f64>, p: usize, q: usize, c: f64, s: f64) {
    for i in 0..m.nrows() {
        let mp = m[[i, p]];
        let mq = m[[i, q]];
        m[[i, p]] = c * mp - s * mq;
        m[[i, q]] = s * mp + c * mq;
    }
}

/// Replace the listed columns with unit vectors orthogonal to every other column.
fn complete_basis(u: &mut Array2<f64>, deficient: &[usize]) {
    let n = u.nrows();
    let mut basis: Vec<usize> = (0..u.ncols()).filter(|j| !deficient.contains(j)).collect();

    for &j in deficient {
        let mut best: Option<(f64, Array1<f64>)> = None;
        for k in 0..n {
            let mut w = Array1::<f64>::zeros(n);
            w[k] = 1.0;
            for &b in &basis {
                let col = u.column(b);
                let proj = col.dot(&w);
                w.scaled_add(-proj, &col);
            }
            let norm = w.dot(&w).sqrt();
            if best.as_ref().map_or(true, |(bn, _)| norm > *bn) {
                best = Some((norm, w.mapv(|x| x / norm)));
            }
        }
        if let Some((_, w)) = best {
            u.column_mut(j).assign(&w);
        }
        basis.push(j);
    }
}

/// Maximum absolute deviation of `mᵀm` from the identity.
pub fn orthogonality_error(m: &Array2<f64>) -> f64 {
    let gram = m.t().dot(m);
    let eye = Array2::<f64>::eye(gram.nrows());
    (&gram - &eye).iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

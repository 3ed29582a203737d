// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Tridiag
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thomas algorithm for tridiagonal systems.
//!
//! Used by the natural cubic spline to solve for the node second
//! derivatives.

use cluster_types::error::{ProfileError, ProfileResult};

/// Pivots with magnitude below this are treated as zero.
const PIVOT_EPS: f64 = 1e-300;

/// Solve tridiagonal system Ax = d using the Thomas algorithm.
///
/// - `sub`: sub-diagonal \[n\] (sub\[0\] unused)
/// - `diag`: main diagonal \[n\]
/// - `sup`: super-diagonal \[n\] (sup\[n-1\] unused)
/// - `rhs`: right-hand side \[n\]
///
/// Returns the solution vector, or `SingularSystem` when a pivot vanishes.
/// No pivoting is done; the spline systems are diagonally dominant.
pub fn thomas_solve(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> ProfileResult<Vec<f64>> {
    let n = rhs.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    debug_assert_eq!(sub.len(), n);
    debug_assert_eq!(diag.len(), n);
    debug_assert_eq!(sup.len(), n);

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    if diag[0].abs() < PIVOT_EPS {
        return Err(ProfileError::SingularSystem { row: 0 });
    }
    c_prime[0] = sup[0] / diag[0];
    d_prime[0] = rhs[0] / diag[0];

    for i in 1..n {
        let den = diag[i] - sub[i] * c_prime[i - 1];
        if den.abs() < PIVOT_EPS {
            return Err(ProfileError::SingularSystem { row: i });
        }
        if i < n - 1 {
            c_prime[i] = sup[i] / den;
        }
        d_prime[i] = (rhs[i] - sub[i] * d_prime[i - 1]) / den;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thomas_identity() {
        let n = 5;
        let d = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let x = thomas_solve(&vec![0.0; n], &vec![1.0; n], &vec![0.0; n], &d).unwrap();
        for i in 0..n {
            assert!((x[i] - d[i]).abs() < 1e-12, "x[{i}] should equal d[{i}]");
        }
    }

    #[test]
    fn test_thomas_spline_pattern() {
        // Uniform-spacing spline moments: [1 4 1] / 6 rows.
        let n = 6;
        let sub: Vec<f64> = (0..n).map(|i| if i > 0 { 1.0 } else { 0.0 }).collect();
        let diag = vec![4.0; n];
        let sup: Vec<f64> = (0..n).map(|i| if i < n - 1 { 1.0 } else { 0.0 }).collect();
        let rhs: Vec<f64> = (0..n).map(|i| (i as f64).cos()).collect();
        let x = thomas_solve(&sub, &diag, &sup, &rhs).unwrap();

        for i in 0..n {
            let mut ax = diag[i] * x[i];
            if i > 0 {
                ax += sub[i] * x[i - 1];
            }
            if i < n - 1 {
                ax += sup[i] * x[i + 1];
            }
            assert!((ax - rhs[i]).abs() < 1e-12, "Ax[{i}] = {ax}, expected {}", rhs[i]);
        }
    }

    #[test]
    fn test_thomas_zero_pivot_reported() {
        let err = thomas_solve(&[0.0, 1.0], &[0.0, 1.0], &[1.0, 0.0], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, ProfileError::SingularSystem { row: 0 }));
    }

    #[test]
    fn test_thomas_empty() {
        assert!(thomas_solve(&[], &[], &[], &[]).unwrap().is_empty());
    }
}

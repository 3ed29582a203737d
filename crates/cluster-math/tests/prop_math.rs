// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Property-Based Tests (proptest) for cluster-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for cluster-math using proptest.
//!
//! Covers: Thomas solver, Gauss–Kronrod quadrature, natural cubic spline,
//! log-spaced tables and their inversion.

use cluster_math::quadrature::{integrate, QuadratureRule, QuadratureWorkspace};
use cluster_math::spline::SplineInterpolant;
use cluster_math::table::{log_spaced_radii, ProfileTable};
use cluster_math::tridiag::thomas_solve;
use proptest::prelude::*;

// ── Thomas Solver Properties ─────────────────────────────────────────

proptest! {
    /// For any diagonally dominant tridiagonal system, x = thomas_solve(a,b,c,d)
    /// should satisfy Ax = d within floating-point tolerance.
    #[test]
    fn thomas_solve_ax_eq_d(n in 3usize..30, off in -0.45f64..0.45) {
        let a: Vec<f64> = (0..n).map(|i| if i > 0 { off } else { 0.0 }).collect();
        let b = vec![1.0; n];
        let c: Vec<f64> = (0..n).map(|i| if i < n - 1 { off } else { 0.0 }).collect();
        let d: Vec<f64> = (0..n).map(|i| (i as f64 + 1.0).sin()).collect();

        let x = thomas_solve(&a, &b, &c, &d).unwrap();

        for i in 0..n {
            let mut ax_i = b[i] * x[i];
            if i > 0 { ax_i += a[i] * x[i - 1]; }
            if i < n - 1 { ax_i += c[i] * x[i + 1]; }
            prop_assert!((ax_i - d[i]).abs() < 1e-10,
                "Ax[{}] = {}, d[{}] = {}", i, ax_i, i, d[i]);
        }
    }
}

// ── Quadrature Properties ────────────────────────────────────────────

proptest! {
    /// Polynomials below the Gauss degree integrate exactly on one interval.
    #[test]
    fn quadrature_polynomial_exact(deg in 0i32..20, a in -3.0f64..0.0, len in 0.1f64..4.0) {
        let b = a + len;
        let exact = (b.powi(deg + 1) - a.powi(deg + 1)) / (deg + 1) as f64;
        let scale = 1.0 + a.abs().max(b.abs()).powi(deg + 1);
        let mut ws = QuadratureWorkspace::new(64);
        for rule in [QuadratureRule::GaussKronrod41, QuadratureRule::GaussKronrod61] {
            let r = integrate(|x| x.powi(deg), a, b, 1e-12, 1e-12, rule, &mut ws);
            prop_assert!((r.value - exact).abs() <= 1e-11 * scale,
                "deg {} over [{}, {}]: {} vs {}", deg, a, b, r.value, exact);
        }
    }

    /// Splitting the range at any interior point gives the same total.
    #[test]
    fn quadrature_additive(split in 0.05f64..0.95) {
        let f = |x: f64| (-x).exp() * (3.0 * x).cos();
        let mut ws = QuadratureWorkspace::new(256);
        let rule = QuadratureRule::GaussKronrod41;
        let whole = integrate(f, 0.0, 5.0, 0.0, 1e-10, rule, &mut ws).value;
        let left = integrate(f, 0.0, 5.0 * split, 0.0, 1e-10, rule, &mut ws).value;
        let right = integrate(f, 5.0 * split, 5.0, 0.0, 1e-10, rule, &mut ws).value;
        prop_assert!((left + right - whole).abs() < 1e-9);
    }

    /// Reported error bounds the true error for a smooth integrand.
    #[test]
    fn quadrature_error_estimate_honest(k in 1.0f64..40.0) {
        let exact = (1.0 - k.cos()) / k;
        let mut ws = QuadratureWorkspace::new(512);
        let r = integrate(|x| (k * x).sin(), 0.0, 1.0, 0.0, 1e-8,
            QuadratureRule::GaussKronrod41, &mut ws);
        prop_assert!(r.is_converged());
        prop_assert!((r.value - exact).abs() <= r.abs_error.max(1e-14));
    }
}

// ── Spline Properties ────────────────────────────────────────────────

proptest! {
    /// Spline passes through every node for arbitrary increasing abscissae.
    #[test]
    fn spline_interpolates_nodes(
        steps in prop::collection::vec(0.01f64..2.0, 3..40),
        seed in 0u32..1000,
    ) {
        let mut x = Vec::with_capacity(steps.len());
        let mut acc = 0.0;
        for s in &steps {
            acc += s;
            x.push(acc);
        }
        let y: Vec<f64> = x.iter().enumerate()
            .map(|(i, v)| (v + seed as f64 * 0.01).sin() + i as f64 * 0.1)
            .collect();
        let s = SplineInterpolant::natural(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            prop_assert!((s.eval(*xi) - yi).abs() < 1e-9);
        }
    }

    /// Evaluations never leave the clamped domain's value range at the ends.
    #[test]
    fn spline_clamped_outside(q in -100.0f64..100.0) {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![2.0, 3.0, 5.0, 4.0];
        let s = SplineInterpolant::natural(&x, &y).unwrap();
        let v = s.eval(q);
        if q <= 0.0 { prop_assert!((v - 2.0).abs() < 1e-12); }
        if q >= 3.0 { prop_assert!((v - 4.0).abs() < 1e-12); }
    }
}

// ── Table Properties ─────────────────────────────────────────────────

proptest! {
    /// Log-spaced radii are strictly increasing after the boundary node.
    #[test]
    fn log_radii_increasing(rmin in 0.01f64..10.0, decades in 0.5f64..6.0, n in 3usize..2048) {
        let rmax = rmin * 10f64.powf(decades);
        let r = log_spaced_radii(rmin, rmax, n, 0.0);
        prop_assert_eq!(r[0], 0.0);
        for k in 1..n {
            prop_assert!(r[k] > r[k - 1]);
        }
        prop_assert!((r[n - 1] - rmax).abs() <= 1e-9 * rmax);
    }

    /// After the monotone clamp, inversion always yields a valid spline.
    #[test]
    fn clamped_table_inverts(noise in prop::collection::vec(-0.2f64..0.2, 16)) {
        let r = log_spaced_radii(0.1, 100.0, 17, 0.0);
        let mut t = ProfileTable::tabulate(r, 0.0, |k, x| x.ln_1p() + noise[k - 1]);
        t.enforce_non_decreasing();
        prop_assert!(t.is_non_decreasing());
        let inv = t.inverted();
        if inv.len() >= 3 {
            prop_assert!(inv.spline().is_ok());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Cubic Spline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Natural cubic spline with a last-interval lookup accelerator.
//!
//! The fitted spline is immutable. Interval lookup state lives in an
//! [`Accelerator`], which uses `Cell` and is therefore `!Sync`: every
//! worker must own its own [`SplineInterpolant`].
//!
//! On interval [x_i, x_{i+1}] with h = x_{i+1} − x_i, a = (x_{i+1} − x)/h,
//! b = 1 − a and node second derivatives M:
//!   S(x) = a·y_i + b·y_{i+1} + ((a³ − a)·M_i + (b³ − b)·M_{i+1})·h²/6
//! with M_0 = M_{n−1} = 0 (natural boundary).

use std::cell::Cell;

use cluster_types::error::{ProfileError, ProfileResult};
use ndarray::Array1;

use crate::tridiag::thomas_solve;

/// Minimum node count of a natural cubic spline.
pub const MIN_SPLINE_NODES: usize = 3;

#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Array1<f64>,
    y: Array1<f64>,
    /// Second derivative at each node.
    m: Array1<f64>,
}

impl CubicSpline {
    /// Fit a natural cubic spline through (x, y).
    ///
    /// `x` must be strictly increasing and hold at least three nodes.
    pub fn natural(x: &[f64], y: &[f64]) -> ProfileResult<Self> {
        let n = x.len();
        if n != y.len() {
            return Err(ProfileError::LengthMismatch { x: n, y: y.len() });
        }
        if n < MIN_SPLINE_NODES {
            return Err(ProfileError::TooFewNodes {
                required: MIN_SPLINE_NODES,
                got: n,
            });
        }
        for i in 1..n {
            // Written as a negation so NaN abscissae are rejected too.
            if !(x[i] > x[i - 1]) {
                return Err(ProfileError::NonIncreasingAbscissa {
                    index: i,
                    prev: x[i - 1],
                    next: x[i],
                });
            }
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

        let k = n - 2;
        let mut sub = vec![0.0; k];
        let mut diag = vec![0.0; k];
        let mut sup = vec![0.0; k];
        let mut rhs = vec![0.0; k];
        for row in 0..k {
            let i = row + 1;
            sub[row] = h[i - 1];
            diag[row] = 2.0 * (h[i - 1] + h[i]);
            sup[row] = h[i];
            rhs[row] = 6.0 * (slope[i] - slope[i - 1]);
        }
        let interior = thomas_solve(&sub, &diag, &sup, &rhs)?;

        let mut m = Array1::zeros(n);
        for (row, value) in interior.into_iter().enumerate() {
            m[row + 1] = value;
        }

        Ok(Self {
            x: Array1::from(x.to_vec()),
            y: Array1::from(y.to_vec()),
            m,
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x_min(&self) -> f64 {
        self.x[0]
    }

    pub fn x_max(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    /// Ordinate at the last node.
    pub fn y_at_max(&self) -> f64 {
        self.y[self.y.len() - 1]
    }

    pub fn nodes(&self) -> (&Array1<f64>, &Array1<f64>) {
        (&self.x, &self.y)
    }

    /// Value at `x`, clamped into [x_min, x_max].
    pub fn eval(&self, x: f64, acc: &Accelerator) -> f64 {
        let x = x.clamp(self.x_min(), self.x_max());
        let i = acc.find(&self.x, x);
        let (h, a, b) = self.weights(i, x);
        a * self.y[i]
            + b * self.y[i + 1]
            + ((a * a * a - a) * self.m[i] + (b * b * b - b) * self.m[i + 1]) * h * h / 6.0
    }

    /// First derivative at `x`, clamped into [x_min, x_max].
    pub fn eval_deriv(&self, x: f64, acc: &Accelerator) -> f64 {
        let x = x.clamp(self.x_min(), self.x_max());
        let i = acc.find(&self.x, x);
        let (h, a, b) = self.weights(i, x);
        (self.y[i + 1] - self.y[i]) / h - (3.0 * a * a - 1.0) / 6.0 * h * self.m[i]
            + (3.0 * b * b - 1.0) / 6.0 * h * self.m[i + 1]
    }

    fn weights(&self, i: usize, x: f64) -> (f64, f64, f64) {
        let h = self.x[i + 1] - self.x[i];
        let a = (self.x[i + 1] - x) / h;
        (h, a, 1.0 - a)
    }
}

/// Caches the last bracketing interval for amortised O(1) sequential lookup.
#[derive(Debug, Clone, Default)]
pub struct Accelerator {
    cache: Cell<usize>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl Accelerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&self) {
        self.cache.set(0);
        self.hits.set(0);
        self.misses.set(0);
    }

    /// (hits, misses) since construction or the last reset.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits.get(), self.misses.get())
    }

    /// Index i with xa[i] <= x < xa[i+1], or n−2 at the right endpoint.
    ///
    /// `x` must already lie inside [xa[0], xa[n−1]].
    fn find(&self, xa: &Array1<f64>, x: f64) -> usize {
        let n = xa.len();
        if n < 2 {
            return 0;
        }
        let i = self.cache.get().min(n - 2);
        let idx = if x < xa[i] {
            self.misses.set(self.misses.get() + 1);
            bracket(xa, x, 0, i)
        } else if x >= xa[i + 1] {
            self.misses.set(self.misses.get() + 1);
            bracket(xa, x, i, n - 1)
        } else {
            self.hits.set(self.hits.get() + 1);
            i
        };
        self.cache.set(idx);
        idx
    }
}

/// Binary search for the interval of `x` within xa[lo..=hi].
fn bracket(xa: &Array1<f64>, x: f64, mut lo: usize, mut hi: usize) -> usize {
    while hi > lo + 1 {
        let mid = (lo + hi) / 2;
        if xa[mid] > x {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

/// One fitted spline plus the accelerator private to its owner.
#[derive(Debug, Clone)]
pub struct SplineInterpolant {
    spline: CubicSpline,
    acc: Accelerator,
}

impl SplineInterpolant {
    pub fn new(spline: CubicSpline) -> Self {
        Self {
            spline,
            acc: Accelerator::new(),
        }
    }

    pub fn natural(x: &[f64], y: &[f64]) -> ProfileResult<Self> {
        CubicSpline::natural(x, y).map(Self::new)
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.spline.eval(x, &self.acc)
    }

    pub fn eval_deriv(&self, x: f64) -> f64 {
        self.spline.eval_deriv(x, &self.acc)
    }

    pub fn x_min(&self) -> f64 {
        self.spline.x_min()
    }

    pub fn x_max(&self) -> f64 {
        self.spline.x_max()
    }

    pub fn y_at_max(&self) -> f64 {
        self.spline.y_at_max()
    }

    pub fn spline(&self) -> &CubicSpline {
        &self.spline
    }

    pub fn accelerator(&self) -> &Accelerator {
        &self.acc
    }
}

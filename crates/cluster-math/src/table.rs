// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Profile Tables
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Log-spaced radial tables with monotone repair.

use cluster_types::error::ProfileResult;
use ndarray::Array1;

use crate::spline::SplineInterpolant;

/// Radial grid r[k] = rmin·10^(k·log10(rmax/rmin)/(n−1)), k = 1..n−1.
///
/// r[0] is set to `r0`, the boundary node of the table. The last node is
/// exactly `rmax`.
pub fn log_spaced_radii(rmin: f64, rmax: f64, n: usize, r0: f64) -> Array1<f64> {
    let mut r = Array1::zeros(n);
    if n == 0 {
        return r;
    }
    r[0] = r0;
    if n == 1 {
        return r;
    }
    let log_dr = (rmax / rmin).log10() / (n - 1) as f64;
    for k in 1..n {
        r[k] = rmin * 10f64.powf(k as f64 * log_dr);
    }
    r[n - 1] = rmax;
    r
}

/// One tabulated node, as handed to diagnostic observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableNode {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct ProfileTable {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
}

impl ProfileTable {
    /// Evaluate `f(k, x[k])` at nodes 1..n−1; node 0 takes `y0`.
    pub fn tabulate<F>(x: Array1<f64>, y0: f64, mut f: F) -> Self
    where
        F: FnMut(usize, f64) -> f64,
    {
        let mut y = Array1::zeros(x.len());
        if !y.is_empty() {
            y[0] = y0;
        }
        for k in 1..x.len() {
            y[k] = f(k, x[k]);
        }
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Clamp y[k] = max(y[k], y[k−1]). Returns the number of nodes changed.
    pub fn enforce_non_decreasing(&mut self) -> usize {
        let mut clamped = 0;
        for k in 1..self.y.len() {
            if self.y[k] < self.y[k - 1] {
                self.y[k] = self.y[k - 1];
                clamped += 1;
            }
        }
        clamped
    }

    /// Clamp y[k] = min(y[k], y[k−1]). Returns the number of nodes changed.
    pub fn enforce_non_increasing(&mut self) -> usize {
        let mut clamped = 0;
        for k in 1..self.y.len() {
            if self.y[k] > self.y[k - 1] {
                self.y[k] = self.y[k - 1];
                clamped += 1;
            }
        }
        clamped
    }

    pub fn is_non_decreasing(&self) -> bool {
        self.y.windows(2).into_iter().all(|w| w[1] >= w[0])
    }

    pub fn is_non_increasing(&self) -> bool {
        self.y.windows(2).into_iter().all(|w| w[1] <= w[0])
    }

    /// Swap the roles of x and y for a non-decreasing table.
    ///
    /// Plateau nodes (y not above the last kept y) are dropped so the new
    /// abscissa is strictly increasing; the first node of a plateau is kept.
    pub fn inverted(&self) -> ProfileTable {
        let mut xs = Vec::with_capacity(self.len());
        let mut ys = Vec::with_capacity(self.len());
        for (&x, &y) in self.x.iter().zip(self.y.iter()) {
            if xs.last().map_or(true, |&last| y > last) {
                xs.push(y);
                ys.push(x);
            }
        }
        ProfileTable {
            x: Array1::from(xs),
            y: Array1::from(ys),
        }
    }

    /// Fit a natural cubic spline through the table.
    pub fn spline(&self) -> ProfileResult<SplineInterpolant> {
        SplineInterpolant::natural(&self.x.to_vec(), &self.y.to_vec())
    }

    pub fn for_each_node<F: FnMut(TableNode)>(&self, mut f: F) {
        for (index, (&x, &y)) in self.x.iter().zip(self.y.iter()).enumerate() {
            f(TableNode { index, x, y });
        }
    }
}

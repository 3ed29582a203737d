// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Tabulation Pipeline Support
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shared pieces of the per-profile table builders.

use cluster_math::quadrature::{integrate, QuadratureRule, QuadratureWorkspace};
use cluster_math::table::ProfileTable;
use cluster_types::state::ProfileKind;
use log::{debug, warn};

/// What one table build did, kept by the context for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
    pub cluster: usize,
    pub kind: ProfileKind,
    pub nodes: usize,
    pub r_min: f64,
    pub r_max: f64,
    /// Nodes changed by the monotone clamp.
    pub clamped: usize,
    /// Node integrals that stopped short of their tolerance.
    pub unconverged: usize,
    /// Largest quadrature error estimate over all nodes.
    pub max_abs_error: f64,
}

impl TableReport {
    pub(crate) fn analytic(cluster: usize, kind: ProfileKind, table: &ProfileTable) -> Self {
        let report = Self {
            cluster,
            kind,
            nodes: table.len(),
            r_min: table.x[0],
            r_max: table.x[table.len() - 1],
            clamped: 0,
            unconverged: 0,
            max_abs_error: 0.0,
        };
        report.log();
        report
    }

    pub(crate) fn log(&self) {
        debug!(
            "cluster {}: {} table, {} nodes over [{:.3e}, {:.3e}], {} clamped, {} unconverged",
            self.cluster,
            self.kind,
            self.nodes,
            self.r_min,
            self.r_max,
            self.clamped,
            self.unconverged
        );
    }
}

/// Quadrature settings plus running diagnostics for one table build.
pub(crate) struct NodeIntegrator {
    cluster: usize,
    kind: ProfileKind,
    rule: QuadratureRule,
    rel_tol: f64,
    workspace: QuadratureWorkspace,
    unconverged: usize,
    max_abs_error: f64,
}

impl NodeIntegrator {
    pub(crate) fn new(
        cluster: usize,
        kind: ProfileKind,
        rule: QuadratureRule,
        rel_tol: f64,
        limit: usize,
    ) -> Self {
        Self {
            cluster,
            kind,
            rule,
            rel_tol,
            workspace: QuadratureWorkspace::new(limit),
            unconverged: 0,
            max_abs_error: 0.0,
        }
    }

    /// ∫_a^b f, accepting the best estimate when the tolerance is missed.
    pub(crate) fn integrate<F>(&mut self, f: F, a: f64, b: f64) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        let result = integrate(f, a, b, 0.0, self.rel_tol, self.rule, &mut self.workspace);
        if !result.is_converged() {
            self.unconverged += 1;
            warn!(
                "cluster {}: {} integral over [{:.4e}, {:.4e}] stopped at error {:.3e} ({:?}, {} intervals)",
                self.cluster,
                self.kind,
                a,
                b,
                result.abs_error,
                result.status,
                result.subdivisions
            );
        }
        self.max_abs_error = self.max_abs_error.max(result.abs_error);
        result.value
    }

    pub(crate) fn finish(self, table: &ProfileTable, clamped: usize) -> TableReport {
        let report = TableReport {
            cluster: self.cluster,
            kind: self.kind,
            nodes: table.len(),
            r_min: table.x[0],
            r_max: table.x[table.len() - 1],
            clamped,
            unconverged: self.unconverged,
            max_abs_error: self.max_abs_error,
        };
        report.log();
        report
    }
}

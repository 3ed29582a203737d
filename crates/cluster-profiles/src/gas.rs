// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Gas Mass and Potential Profiles
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Tabulated gas mass M(r) = ∫_0^r 4π r'² ρ(r') dr' and gas potential
//! Ψ(r) = ∫_r^∞ G M(r') / r'² dr'.
//!
//! Both tables run over log-spaced radii out to 1.1·R_Sample. The mass
//! table is clamped non-decreasing against integrator noise and also
//! inverted for sampling by enclosed mass.

use cluster_math::quadrature::QuadratureRule;
use cluster_math::spline::SplineInterpolant;
use cluster_math::table::{log_spaced_radii, ProfileTable};
use cluster_types::config::TableSettings;
use cluster_types::constants::GAUGE_UPPER_BOUND;
use cluster_types::error::ProfileResult;
use cluster_types::state::ProfileKind;

use crate::analytic::GasDensityModel;
use crate::pipeline::{NodeIntegrator, TableReport};

#[derive(Debug, Clone)]
pub struct GasMassProfile {
    r_sample: f64,
    table: ProfileTable,
    forward: SplineInterpolant,
    inverse: SplineInterpolant,
}

impl GasMassProfile {
    pub fn build(
        index: usize,
        model: &GasDensityModel,
        r_sample: f64,
        tables: &TableSettings,
    ) -> ProfileResult<(Self, TableReport)> {
        let radii = log_spaced_radii(
            tables.r_min_mass,
            tables.r_sample_padding * r_sample,
            tables.table_size,
            0.0,
        );
        let mut integrator = NodeIntegrator::new(
            index,
            ProfileKind::GasMass,
            QuadratureRule::GaussKronrod41,
            tables.mass_rel_tol,
            tables.mass_limit,
        );
        let mut table =
            ProfileTable::tabulate(radii, 0.0, |_, r| {
                integrator.integrate(|x| model.mass_integrand(x), 0.0, r)
            });
        let clamped = table.enforce_non_decreasing();

        let forward = table.spline()?;
        let inverse = table.inverted().spline()?;
        let report = integrator.finish(&table, clamped);

        Ok((
            Self {
                r_sample,
                table,
                forward,
                inverse,
            },
            report,
        ))
    }

    /// Enclosed gas mass; radii beyond R_Sample are clamped to it.
    pub fn mass(&self, r: f64) -> f64 {
        self.forward.eval(r.min(self.r_sample))
    }

    /// Radius enclosing the absolute gas mass `m`.
    pub fn inverted(&self, m: f64) -> f64 {
        self.inverse.eval(m)
    }

    /// Gas mass inside R_Sample.
    pub fn total_mass(&self) -> f64 {
        self.mass(self.r_sample)
    }

    pub fn r_sample(&self) -> f64 {
        self.r_sample
    }

    pub fn table(&self) -> &ProfileTable {
        &self.table
    }
}

/// Gas potential in the Ψ = −Φ convention, Ψ ≥ 0 and Ψ(∞) = 0.
///
/// Ψ(r) = gauge − ∫_0^r G M(r')/r'² dr' with gauge the same integral taken
/// to 1e100. Beyond R_Sample the enclosed mass is constant, so the profile
/// continues as ψ(R_Sample)·R_Sample/r.
#[derive(Debug, Clone)]
pub struct GasPotentialProfile {
    r_max: f64,
    psi_max: f64,
    gauge: f64,
    table: ProfileTable,
    spline: SplineInterpolant,
}

impl GasPotentialProfile {
    pub fn build(
        index: usize,
        mass: &GasMassProfile,
        grav_const: f64,
        tables: &TableSettings,
    ) -> ProfileResult<(Self, TableReport)> {
        let r_sample = mass.r_sample();
        let mut integrator = NodeIntegrator::new(
            index,
            ProfileKind::GasPotential,
            QuadratureRule::GaussKronrod61,
            tables.potential_rel_tol,
            tables.potential_limit,
        );
        let field = |r: f64| {
            if r == 0.0 {
                0.0
            } else {
                grav_const * mass.mass(r) / (r * r)
            }
        };

        let gauge = integrator.integrate(field, 0.0, GAUGE_UPPER_BOUND);

        let radii = log_spaced_radii(
            tables.r_min_potential,
            tables.r_sample_padding * r_sample,
            tables.table_size,
            0.0,
        );
        let mut table = ProfileTable::tabulate(radii, gauge, |_, r| {
            gauge - integrator.integrate(field, 0.0, r)
        });
        let clamped = table.enforce_non_increasing();

        let spline = table.spline()?;
        let psi_max = spline.eval(r_sample);
        let report = integrator.finish(&table, clamped);

        Ok((
            Self {
                r_max: r_sample,
                psi_max,
                gauge,
                table,
                spline,
            },
            report,
        ))
    }

    pub fn potential(&self, r: f64) -> f64 {
        if r < self.r_max {
            self.spline.eval(r)
        } else {
            self.psi_max * self.r_max / r
        }
    }

    /// Ψ(0), the full integral of G M / r².
    pub fn gauge(&self) -> f64 {
        self.gauge
    }

    pub fn table(&self) -> &ProfileTable {
        &self.table
    }
}

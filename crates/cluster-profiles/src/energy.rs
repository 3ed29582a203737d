// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Internal Energy Profile
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Specific internal energy of gas in hydrostatic equilibrium
//! (Donnert et al. 2014, eq. 9):
//!
//!   u(r) = G / ((γ − 1) ρ(r)) · ∫_r^R ρ(r') (M_gas(r') + M_dm(r')) / r'² dr'
//!
//! with the open boundary R = √3·boxsize so the temperature stays positive
//! across the whole box.

use cluster_math::quadrature::QuadratureRule;
use cluster_math::spline::SplineInterpolant;
use cluster_math::table::{log_spaced_radii, ProfileTable};
use cluster_types::config::{GlobalParams, TableSettings};
use cluster_types::constants::{NO_RCUT_RADIUS, SQRT3};
use cluster_types::error::ProfileResult;
use cluster_types::state::ProfileKind;

use crate::analytic::GasDensityModel;
use crate::dm::DmMassProfile;
use crate::gas::GasMassProfile;
use crate::pipeline::{NodeIntegrator, TableReport};

#[derive(Debug, Clone)]
pub struct InternalEnergyProfile {
    table: ProfileTable,
    spline: SplineInterpolant,
}

impl InternalEnergyProfile {
    pub fn build(
        index: usize,
        model: &GasDensityModel,
        gas: &GasMassProfile,
        dm: &DmMassProfile,
        global: &GlobalParams,
        tables: &TableSettings,
    ) -> ProfileResult<(Self, TableReport)> {
        let model = if global.no_rcut_in_t {
            model.with_rcut(NO_RCUT_RADIUS)
        } else {
            *model
        };
        let r_outer = SQRT3 * global.boxsize;
        let prefactor = global.grav_const / (global.adiabatic_index - 1.0);

        let mut integrator = NodeIntegrator::new(
            index,
            ProfileKind::InternalEnergy,
            QuadratureRule::GaussKronrod41,
            tables.energy_rel_tol,
            tables.energy_limit,
        );
        let support = |r: f64| model.density(r) / (r * r) * (gas.mass(r) + dm.mass(r));

        let radii = log_spaced_radii(tables.r_min_mass, r_outer, tables.table_size, 0.0);
        let mut table = ProfileTable::tabulate(radii, 0.0, |_, r| {
            prefactor / model.density(r) * integrator.integrate(support, r, r_outer)
        });
        table.y[0] = table.y[1];

        let spline = table.spline()?;
        let report = integrator.finish(&table, 0);

        Ok((Self { table, spline }, report))
    }

    pub fn energy(&self, r: f64) -> f64 {
        self.spline.eval(r)
    }

    pub fn table(&self) -> &ProfileTable {
        &self.table
    }
}

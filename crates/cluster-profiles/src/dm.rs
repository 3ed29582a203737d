// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Dark-Matter Mass Profile
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! NFW enclosed-mass profile and its inverse for quantile sampling.
//!
//! The forward mass is analytic. Only the inverse, radius as a function
//! of the enclosed fraction q = M(r)/M_dm, is tabulated over
//! [r_min, boxsize/2] with (q, r) = (0, 0) as the first node.

use cluster_math::spline::SplineInterpolant;
use cluster_math::table::{log_spaced_radii, ProfileTable};
use cluster_types::config::{ClusterParams, GlobalParams, TableSettings};
use cluster_types::error::ProfileResult;
use cluster_types::state::ProfileKind;

use crate::analytic::nfw_mass;
use crate::pipeline::TableReport;

#[derive(Debug, Clone)]
pub struct DmMassProfile {
    rho0_nfw: f64,
    rs: f64,
    mass_dm: f64,
    table: ProfileTable,
    inverse: SplineInterpolant,
}

impl DmMassProfile {
    pub fn build(
        index: usize,
        cluster: &ClusterParams,
        global: &GlobalParams,
        tables: &TableSettings,
    ) -> ProfileResult<(Self, TableReport)> {
        let radii = log_spaced_radii(
            tables.r_min_mass,
            0.5 * global.boxsize,
            tables.table_size,
            0.0,
        );
        let table = ProfileTable::tabulate(radii, 0.0, |_, r| {
            nfw_mass(cluster.rho0_nfw, cluster.rs, r) / cluster.mass_dm
        });
        let inverse = table.inverted().spline()?;
        let report = TableReport::analytic(index, ProfileKind::DmMass, &table);

        Ok((
            Self {
                rho0_nfw: cluster.rho0_nfw,
                rs: cluster.rs,
                mass_dm: cluster.mass_dm,
                table,
                inverse,
            },
            report,
        ))
    }

    /// Enclosed NFW mass, evaluated in closed form.
    pub fn mass(&self, r: f64) -> f64 {
        nfw_mass(self.rho0_nfw, self.rs, r)
    }

    /// Radius enclosing the mass fraction `q` of the total DM mass.
    pub fn inverted(&self, q: f64) -> f64 {
        self.inverse.eval(q)
    }

    pub fn total_mass(&self) -> f64 {
        self.mass_dm
    }

    /// Largest fraction covered by the table (at boxsize/2).
    pub fn max_fraction(&self) -> f64 {
        self.inverse.x_max()
    }

    pub fn table(&self) -> &ProfileTable {
        &self.table
    }
}

// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Property-Based Tests (proptest) for cluster-profiles
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for cluster-profiles using proptest.
//!
//! Covers: analytic DM profiles, beta-model density, β = 2/3 closed forms,
//! and the tabulated gas pipelines over randomised clusters.

use cluster_profiles::analytic::{nfw_mass, GasDensityModel};
use cluster_profiles::closed_form::mass_23;
use cluster_profiles::gas::{GasMassProfile, GasPotentialProfile};
use cluster_types::config::{CoolCoreParams, TableSettings};
use proptest::prelude::*;

const G: f64 = 43007.1;

// ── Analytic Profiles ────────────────────────────────────────────────

proptest! {
    /// NFW mass is strictly increasing for r > 0.
    #[test]
    fn nfw_mass_increasing(rho0 in 1e-5f64..1e-2, rs in 10.0f64..1000.0, r in 0.1f64..1e5) {
        let m1 = nfw_mass(rho0, rs, r);
        let m2 = nfw_mass(rho0, rs, r * 1.01);
        prop_assert!(m1 > 0.0);
        prop_assert!(m2 > m1);
    }

    /// Beta-model density is positive and non-increasing in r.
    #[test]
    fn gas_density_decreasing(
        beta in 0.3f64..1.2,
        rc in 5.0f64..500.0,
        rcut in 500.0f64..5000.0,
        cuspy in any::<bool>(),
        r in 0.0f64..2e4,
    ) {
        let cc = Some(CoolCoreParams { rho0_fac: 50.0, rc_fac: 40.0 });
        let model = GasDensityModel::new(1e-4, beta, rc, rcut, cuspy).with_cool_core(cc);
        let inner = model.density(r);
        let outer = model.density(r * 1.05 + 1e-3);
        prop_assert!(inner > 0.0);
        prop_assert!(outer <= inner);
    }

    /// The β = 2/3 closed-form mass is increasing and vanishes at the origin.
    #[test]
    fn mass_23_increasing(rc in 5.0f64..500.0, rcut in 500.0f64..5000.0, r in 0.5f64..1e4) {
        let model = GasDensityModel::new(1e-4, 2.0 / 3.0, rc, rcut, false);
        prop_assert_eq!(mass_23(&model, 0.0), 0.0);
        prop_assert!(mass_23(&model, r * 1.01) > mass_23(&model, r));
    }
}

// ── Tabulated Gas Pipelines ──────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(6))]

    /// Gas mass tables are non-decreasing and their potential non-increasing
    /// for any physically sensible cluster.
    #[test]
    fn gas_tables_monotone(
        beta in 0.5f64..0.9,
        rc in 20.0f64..300.0,
        rcut in 800.0f64..3000.0,
        r_sample in 1000.0f64..4000.0,
    ) {
        let settings = TableSettings::default();
        let model = GasDensityModel::new(3e-5, beta, rc, rcut, false);
        let (gas, _) = GasMassProfile::build(0, &model, r_sample, &settings).unwrap();
        prop_assert!(gas.table().is_non_decreasing());
        prop_assert_eq!(gas.mass(0.0), 0.0);

        let (psi, _) = GasPotentialProfile::build(0, &gas, G, &settings).unwrap();
        prop_assert!(psi.table().is_non_increasing());
        prop_assert!(psi.potential(2.0 * r_sample) > 0.0);
    }
}

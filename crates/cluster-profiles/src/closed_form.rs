// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Closed-Form Solutions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Analytic solutions for the β = 2/3 gas model and the Hernquist + beta
//! temperature profile (Donnert et al. 2014).
//!
//! These are validation paths for the tabulated pipelines: for β = 2/3 the
//! density ρ0 / (1 + (r/rc)²) / (1 + (r/rcut)⁴) has an elementary
//! antiderivative built from logarithms and arctangents.

use std::f64::consts::PI;

use cluster_types::config::{ClusterParams, GlobalParams};
use cluster_types::constants::SQRT2;

use crate::analytic::GasDensityModel;

/// ∫_0^r r'² / (1 + (r'/rc)²) / (1 + (r'/rcut)⁴) dr'  (per unit ρ0, without 4π)
fn beta23_mass_kernel(rc: f64, rcut: f64, r: f64) -> f64 {
    let r2 = r * r;
    let rc2 = rc * rc;
    let rcut2 = rcut * rcut;
    let s = SQRT2 * rcut * r;

    let logs = (rcut2 - s + r2).ln() - (rcut2 + s + r2).ln();
    let atans = (SQRT2 * r / rcut + 1.0).atan() - (1.0 - SQRT2 * r / rcut).atan();

    rc2 * rcut2 * rcut / (8.0 * (rcut2 * rcut2 + rc2 * rc2))
        * (SQRT2 * ((rc2 - rcut2) * logs + 2.0 * (rc2 + rcut2) * atans)
            - 8.0 * rc * rcut * (r / rc).atan())
}

/// Ψ of the unit-density β = 2/3 shell model, without G, with Ψ(∞) = 0.
fn beta23_potential_kernel(rc: f64, rcut: f64, r: f64) -> f64 {
    let r2 = r * r;
    let rc2 = rc * rc;
    let rc4 = rc2 * rc2;
    let rcut2 = rcut * rcut;
    let rcut4 = rcut2 * rcut2;
    let s = SQRT2 * rcut * r;
    let log_minus = (rcut2 - s + r2).ln();
    let log_plus = (rcut2 + s + r2).ln();

    let bracket = 8.0 * rc * rcut2 * (r / rc).atan()
        + 4.0 * rc2 * r * (r2 / rcut2).atan()
        + rcut
            * (2.0 * SQRT2 * (rc2 + rcut2) * ((1.0 - SQRT2 * r / rcut).atan()
                - (1.0 + SQRT2 * r / rcut).atan())
                + 4.0 * rcut * r * (rc2 + r2).ln()
                + SQRT2 * (rcut2 - rc2) * (log_minus - log_plus)
                - 2.0 * rcut * r * (rcut4 + r2 * r2).ln());

    let shells = -4.0 * PI * rc2 * rcut2 / (8.0 * (rc4 + rcut4) * r) * bracket;
    // Gauge so that Ψ vanishes at infinity.
    shells + PI * PI * rc4 * rcut2 / (rc4 + rcut4)
}

/// Enclosed gas mass of the β = 2/3 model, including the cool-core term.
///
/// β of `model` is ignored; the result is exact only for β = 2/3.
pub fn mass_23(model: &GasDensityModel, r: f64) -> f64 {
    let mut m = model.rho0 * beta23_mass_kernel(model.rc, model.rcut, r);
    if let Some((rho0_cc, rc_cc)) = model.cool_core_component() {
        m += rho0_cc * beta23_mass_kernel(rc_cc, model.rcut, r);
    }
    4.0 * PI * m
}

/// Gas potential Ψ = −Φ of the β = 2/3 model. Requires r > 0.
pub fn potential_23(grav_const: f64, model: &GasDensityModel, r: f64) -> f64 {
    let mut psi = model.rho0 * beta23_potential_kernel(model.rc, model.rcut, r);
    if let Some((rho0_cc, rc_cc)) = model.cool_core_component() {
        psi += rho0_cc * beta23_potential_kernel(rc_cc, model.rcut, r);
    }
    grav_const * psi
}

fn f1(r: f64, rc: f64, a: f64) -> f64 {
    let rc2 = rc * rc;
    let a2 = a * a;
    let result = (a2 - rc2) * (r / rc).atan() - rc * (a2 + rc2) / (a + r)
        + a * rc * ((a + r) * (a + r) / (rc2 + r * r)).ln();
    result * rc / ((a2 + rc2) * (a2 + rc2))
}

fn f2(r: f64, rc: f64) -> f64 {
    let t = (r / rc).atan();
    t * t / (2.0 * rc) + t / r
}

/// Specific internal energy of a β = 2/3 gas without cutoff in a Hernquist
/// halo, with an open boundary at the box size. Requires d > 0.
///
///   u(d) = G/(γ−1) · (1 + (d/rc)²) · [ M_dm (F1(R) − F1(d)) + 4π ρ0 rc³ (F2(R) − F2(d)) ]
pub fn internal_energy_analytic(cluster: &ClusterParams, global: &GlobalParams, d: f64) -> f64 {
    let rho0 = cluster.rho0;
    let a = cluster.a_hernq;
    let rc = cluster.rcore;
    let rmax = global.boxsize;
    let mdm = cluster.mass_dm;

    global.grav_const / (global.adiabatic_index - 1.0)
        * (1.0 + (d / rc) * (d / rc))
        * (mdm * (f1(rmax, rc, a) - f1(d, rc, a))
            + 4.0 * PI * rho0 * rc.powi(3) * (f2(rmax, rc) - f2(d, rc)))
}

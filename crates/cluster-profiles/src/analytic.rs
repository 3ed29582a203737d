// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Analytic Profiles
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form dark-matter and beta-model gas profiles.
//!
//! All radii in kpc. Density and potential forms require r > 0.

use std::f64::consts::PI;

use cluster_types::config::{ClusterParams, CoolCoreParams, GlobalParams};

/// Hernquist (1989) density: ρ(r) = m/(2π) · a / (r (r + a)³).
pub fn hernquist_density(m: f64, a: f64, r: f64) -> f64 {
    m / (2.0 * PI) * a / (r * (r + a).powi(3))
}

/// NFW density: ρ(r) = ρ0 / ((r/rs)(1 + r/rs)²).
pub fn nfw_density(rho0: f64, rs: f64, r: f64) -> f64 {
    let x = r / rs;
    rho0 / (x * (1.0 + x) * (1.0 + x))
}

/// NFW enclosed mass: M(r) = 4π ρ0 rs³ (ln((rs + r)/rs) − r/(rs + r)).
///
/// Finite at r = 0. Uses `ln_1p` so small radii keep their precision.
pub fn nfw_mass(rho0: f64, rs: f64, r: f64) -> f64 {
    4.0 * PI * rho0 * rs.powi(3) * ((r / rs).ln_1p() - r / (rs + r))
}

/// Hernquist potential in the Ψ = −Φ convention: Ψ(r) = G·M/(r + a).
pub fn hernquist_potential(grav_const: f64, m: f64, a: f64, r: f64) -> f64 {
    grav_const * m / (r + a)
}

/// Single or double beta-model with a steep r⁻⁴ cutoff.
///
///   ρ(r) = ρ0 (1 + (r/rc)²)^(−3β/2) / (1 + (r/rcut)⁴)
///        + ρ0_cc / (1 + (r/rc_cc)²) / (1 + (r/rcut)⁴)      [cool core]
///
/// The second term is present only when the cluster is cuspy and the
/// cool-core factors are configured; ρ0_cc = ρ0·rho0_fac, rc_cc = rc/rc_fac.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasDensityModel {
    pub rho0: f64,
    pub beta: f64,
    pub rc: f64,
    pub rcut: f64,
    pub cuspy: bool,
    pub cool_core: Option<CoolCoreParams>,
}

impl GasDensityModel {
    pub fn new(rho0: f64, beta: f64, rc: f64, rcut: f64, cuspy: bool) -> Self {
        Self {
            rho0,
            beta,
            rc,
            rcut,
            cuspy,
            cool_core: None,
        }
    }

    pub fn from_cluster(cluster: &ClusterParams, global: &GlobalParams) -> Self {
        Self::new(
            cluster.rho0,
            cluster.beta,
            cluster.rcore,
            cluster.rcut,
            cluster.have_cuspy,
        )
        .with_cool_core(global.cool_core)
    }

    pub fn with_cool_core(mut self, cool_core: Option<CoolCoreParams>) -> Self {
        self.cool_core = cool_core;
        self
    }

    /// Same model with a different cutoff radius.
    pub fn with_rcut(mut self, rcut: f64) -> Self {
        self.rcut = rcut;
        self
    }

    /// (ρ0_cc, rc_cc) when the cool-core term contributes.
    pub fn cool_core_component(&self) -> Option<(f64, f64)> {
        match self.cool_core {
            Some(cc) if self.cuspy => Some((self.rho0 * cc.rho0_fac, self.rc / cc.rc_fac)),
            _ => None,
        }
    }

    pub fn density(&self, r: f64) -> f64 {
        let q = r / self.rcut;
        let cutoff = 1.0 + q * q * q * q;
        let x = r / self.rc;
        let mut rho = self.rho0 * (1.0 + x * x).powf(-1.5 * self.beta) / cutoff;
        if let Some((rho0_cc, rc_cc)) = self.cool_core_component() {
            let x_cc = r / rc_cc;
            rho += rho0_cc / (1.0 + x_cc * x_cc) / cutoff;
        }
        rho
    }

    /// Integrand of the enclosed mass, 4π r² ρ(r).
    pub fn mass_integrand(&self, r: f64) -> f64 {
        4.0 * PI * r * r * self.density(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfw_mass_closed_form_at_rs() {
        let m = nfw_mass(1e-3, 200.0, 200.0);
        let expected = 4.0 * PI * 1e-3 * 200f64.powi(3) * (2f64.ln() - 0.5);
        assert!((m - expected).abs() / expected < 1e-14, "M(rs) = {m}");
        assert_eq!(nfw_mass(1e-3, 200.0, 0.0), 0.0);
    }

    #[test]
    fn test_nfw_mass_derivative_is_shell_mass() {
        let (rho0, rs) = (2e-4, 150.0);
        for r in [1.0, 50.0, 300.0, 4000.0] {
            let h = 1e-4 * r;
            let dm = (nfw_mass(rho0, rs, r + h) - nfw_mass(rho0, rs, r - h)) / (2.0 * h);
            let shell = 4.0 * PI * r * r * nfw_density(rho0, rs, r);
            assert!((dm - shell).abs() / shell < 1e-6, "r = {r}: {dm} vs {shell}");
        }
    }

    #[test]
    fn test_hernquist_total_mass() {
        // ∫ 4π r² ρ dr over [0, R] = m R² / (R + a)²
        let (m, a, big_r) = (10.0, 50.0, 400.0);
        let n = 200_000;
        let dr = big_r / n as f64;
        let mut sum = 0.0;
        for k in 0..n {
            let r = (k as f64 + 0.5) * dr;
            sum += 4.0 * PI * r * r * hernquist_density(m, a, r) * dr;
        }
        let expected = m * big_r * big_r / ((big_r + a) * (big_r + a));
        assert!((sum - expected).abs() / expected < 1e-5);
    }

    #[test]
    fn test_hernquist_potential_decays() {
        let g = 43007.1;
        assert!((hernquist_potential(g, 80.0, 300.0, 0.0) - g * 80.0 / 300.0).abs() < 1e-9);
        assert!(hernquist_potential(g, 80.0, 300.0, 1e12) < 1e-3);
    }

    #[test]
    fn test_gas_density_core_and_cutoff() {
        let model = GasDensityModel::new(1e-3, 2.0 / 3.0, 100.0, 2000.0, false);
        assert!((model.density(0.0) - 1e-3).abs() < 1e-18);
        // β = 2/3: ρ(rc) = ρ0/2 up to the cutoff factor.
        let cut = 1.0 + (100.0f64 / 2000.0).powi(4);
        assert!((model.density(100.0) - 0.5e-3 / cut).abs() < 1e-15);
        assert!(model.density(2000.0) < model.density(1000.0) / 4.0);
    }

    #[test]
    fn test_cool_core_only_when_cuspy() {
        let cc = Some(CoolCoreParams {
            rho0_fac: 50.0,
            rc_fac: 40.0,
        });
        let flat = GasDensityModel::new(1e-3, 0.7, 100.0, 2000.0, false).with_cool_core(cc);
        let cuspy = GasDensityModel::new(1e-3, 0.7, 100.0, 2000.0, true).with_cool_core(cc);
        assert_eq!(flat.cool_core_component(), None);
        assert!((cuspy.density(0.0) - 1e-3 * 51.0).abs() < 1e-15);
        let (rho0_cc, rc_cc) = cuspy.cool_core_component().unwrap();
        assert!((rho0_cc - 0.05).abs() < 1e-15);
        assert!((rc_cc - 2.5).abs() < 1e-15);
    }
}

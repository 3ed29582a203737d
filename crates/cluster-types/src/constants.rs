// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Physical constants and table-construction defaults.
//!
//! Internal units: length kpc, mass 1e10 M☉, velocity km/s.

/// Gravitational constant in kpc (km/s)² / (1e10 M☉).
pub const G_CODE_UNITS: f64 = 43_007.1;

/// Adiabatic index of a monatomic ideal gas.
pub const ADIABATIC_INDEX_MONATOMIC: f64 = 5.0 / 3.0;

/// Nodes in every radial profile table.
pub const TABLE_SIZE: usize = 1024;

/// Inner table radius for mass and energy tables [kpc].
pub const R_MIN_MASS: f64 = 0.1;

/// Inner table radius for the potential table [kpc].
pub const R_MIN_POTENTIAL: f64 = 1.0;

/// Outer table radius of gas tables, in units of R_Sample.
pub const R_SAMPLE_PADDING: f64 = 1.1;

/// Finite stand-in for infinity in the potential gauge integral.
pub const GAUGE_UPPER_BOUND: f64 = 1e100;

/// Cutoff radius used in the temperature integral when the cutoff is excluded [kpc].
pub const NO_RCUT_RADIUS: f64 = 1e6;

pub const SQRT2: f64 = std::f64::consts::SQRT_2;

pub const SQRT3: f64 = 1.732_050_807_568_877_2;

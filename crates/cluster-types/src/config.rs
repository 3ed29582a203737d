// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{
    ADIABATIC_INDEX_MONATOMIC, G_CODE_UNITS, R_MIN_MASS, R_MIN_POTENTIAL, R_SAMPLE_PADDING,
    TABLE_SIZE,
};
use crate::error::{ProfileError, ProfileResult};

/// Top-level cluster-set configuration.
/// One global block plus the per-cluster parameter table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSetConfig {
    pub global: GlobalParams,
    pub clusters: Vec<ClusterParams>,
    #[serde(default)]
    pub tables: TableSettings,
}

/// Parameters shared by every cluster in the set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalParams {
    /// Simulation box side length [kpc]; bounds the DM and energy tables.
    pub boxsize: f64,
    /// Gas profiles are only built when this is > 0.
    pub baryon_fraction: f64,
    #[serde(default = "default_adiabatic_index")]
    pub adiabatic_index: f64,
    #[serde(default = "default_grav_const")]
    pub grav_const: f64,
    /// Presence selects the double-beta cool-core density model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cool_core: Option<CoolCoreParams>,
    /// Exclude the density cutoff from the temperature integral.
    #[serde(default)]
    pub no_rcut_in_t: bool,
}

/// Scaling of the secondary (cool-core) beta component relative to the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoolCoreParams {
    /// ρ0_cc = ρ0 · rho0_fac
    pub rho0_fac: f64,
    /// rc_cc = rc / rc_fac
    pub rc_fac: f64,
}

/// Per-cluster halo and gas parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterParams {
    #[serde(default)]
    pub name: String,
    /// Total dark-matter mass.
    #[serde(rename = "Mass_DM")]
    pub mass_dm: f64,
    /// NFW scale radius.
    #[serde(rename = "Rs")]
    pub rs: f64,
    /// NFW characteristic density.
    #[serde(rename = "Rho0_nfw")]
    pub rho0_nfw: f64,
    /// Hernquist scale radius.
    #[serde(rename = "A_hernq")]
    pub a_hernq: f64,
    /// Central gas density.
    #[serde(rename = "Rho0")]
    pub rho0: f64,
    #[serde(rename = "Rcore")]
    pub rcore: f64,
    #[serde(rename = "Beta")]
    pub beta: f64,
    #[serde(rename = "Rcut")]
    pub rcut: f64,
    #[serde(rename = "Have_Cuspy", default)]
    pub have_cuspy: bool,
    /// Outer radius up to which the gas tables are valid.
    #[serde(rename = "R_Sample")]
    pub r_sample: f64,
}

/// Numerical settings for table construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub table_size: usize,
    pub r_min_mass: f64,
    pub r_min_potential: f64,
    pub r_sample_padding: f64,
    pub mass_rel_tol: f64,
    pub potential_rel_tol: f64,
    pub energy_rel_tol: f64,
    pub mass_limit: usize,
    pub potential_limit: usize,
    pub energy_limit: usize,
}

fn default_adiabatic_index() -> f64 {
    ADIABATIC_INDEX_MONATOMIC
}
fn default_grav_const() -> f64 {
    G_CODE_UNITS
}

impl Default for TableSettings {
    fn default() -> Self {
        TableSettings {
            table_size: TABLE_SIZE,
            r_min_mass: R_MIN_MASS,
            r_min_potential: R_MIN_POTENTIAL,
            r_sample_padding: R_SAMPLE_PADDING,
            mass_rel_tol: 1e-6,
            potential_rel_tol: 1e-6,
            energy_rel_tol: 1e-5,
            mass_limit: TABLE_SIZE,
            potential_limit: 4 * TABLE_SIZE,
            energy_limit: 2 * TABLE_SIZE,
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> ProfileResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ProfileError::InvalidParameter {
            field,
            value,
            reason: "must be positive and finite",
        });
    }
    Ok(())
}

impl GlobalParams {
    pub fn has_gas(&self) -> bool {
        self.baryon_fraction > 0.0
    }

    pub fn validate(&self) -> ProfileResult<()> {
        require_positive("boxsize", self.boxsize)?;
        require_positive("grav_const", self.grav_const)?;
        if !(0.0..1.0).contains(&self.baryon_fraction) {
            return Err(ProfileError::InvalidParameter {
                field: "baryon_fraction",
                value: self.baryon_fraction,
                reason: "must lie in [0, 1)",
            });
        }
        if !self.adiabatic_index.is_finite() || self.adiabatic_index <= 1.0 {
            return Err(ProfileError::InvalidParameter {
                field: "adiabatic_index",
                value: self.adiabatic_index,
                reason: "must exceed 1",
            });
        }
        if let Some(cc) = self.cool_core {
            require_positive("cool_core.rho0_fac", cc.rho0_fac)?;
            require_positive("cool_core.rc_fac", cc.rc_fac)?;
        }
        Ok(())
    }
}

impl ClusterParams {
    /// Check the fields the profiles divide by or take logarithms of.
    /// Gas fields are only checked when `with_gas` is set.
    pub fn validate(&self, with_gas: bool, tables: &TableSettings) -> ProfileResult<()> {
        require_positive("Mass_DM", self.mass_dm)?;
        require_positive("Rs", self.rs)?;
        require_positive("Rho0_nfw", self.rho0_nfw)?;
        require_positive("A_hernq", self.a_hernq)?;
        if !with_gas {
            return Ok(());
        }
        require_positive("Rho0", self.rho0)?;
        require_positive("Rcore", self.rcore)?;
        require_positive("Beta", self.beta)?;
        require_positive("Rcut", self.rcut)?;
        require_positive("R_Sample", self.r_sample)?;
        if self.r_sample <= tables.r_min_potential {
            return Err(ProfileError::InvalidParameter {
                field: "R_Sample",
                value: self.r_sample,
                reason: "must exceed the inner table radius",
            });
        }
        Ok(())
    }
}

impl TableSettings {
    pub fn validate(&self) -> ProfileResult<()> {
        if self.table_size < 4 {
            return Err(ProfileError::ConfigError(format!(
                "table_size must be at least 4, got {}",
                self.table_size
            )));
        }
        require_positive("r_min_mass", self.r_min_mass)?;
        require_positive("r_min_potential", self.r_min_potential)?;
        require_positive("mass_rel_tol", self.mass_rel_tol)?;
        require_positive("potential_rel_tol", self.potential_rel_tol)?;
        require_positive("energy_rel_tol", self.energy_rel_tol)?;
        if self.r_sample_padding < 1.0 {
            return Err(ProfileError::InvalidParameter {
                field: "r_sample_padding",
                value: self.r_sample_padding,
                reason: "tables must reach R_Sample",
            });
        }
        if self.mass_limit == 0 || self.potential_limit == 0 || self.energy_limit == 0 {
            return Err(ProfileError::ConfigError(
                "quadrature subdivision limits must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl ClusterSetConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> ProfileResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> ProfileResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ProfileResult<()> {
        self.global.validate()?;
        self.tables.validate()?;
        if self.clusters.is_empty() {
            return Err(ProfileError::ConfigError(
                "at least one cluster is required".to_string(),
            ));
        }
        let with_gas = self.global.has_gas();
        for cluster in &self.clusters {
            cluster.validate(with_gas, &self.tables)?;
        }
        Ok(())
    }

    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    pub fn cluster(&self, index: usize) -> ProfileResult<&ClusterParams> {
        self.clusters.get(index).ok_or(ProfileError::UnknownCluster {
            index,
            count: self.clusters.len(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::fmt;

/// Build progress of one cluster's profiles on one worker.
///
/// Stages are strictly ordered; the gas stages are only reached when the
/// baryon fraction is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileStage {
    Uninitialized,
    DmBuilt,
    GasMassBuilt,
    GasPotentialBuilt,
    EnergyBuilt,
}

impl ProfileStage {
    /// Final stage of a complete setup.
    pub fn complete(with_gas: bool) -> Self {
        if with_gas {
            ProfileStage::EnergyBuilt
        } else {
            ProfileStage::DmBuilt
        }
    }

    pub fn has_reached(self, other: ProfileStage) -> bool {
        self >= other
    }
}

/// Tabulated profile kinds, used for diagnostics and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    DmMass,
    GasMass,
    GasPotential,
    InternalEnergy,
}

impl ProfileKind {
    pub fn name(self) -> &'static str {
        match self {
            ProfileKind::DmMass => "dm_mass",
            ProfileKind::GasMass => "gas_mass",
            ProfileKind::GasPotential => "gas_potential",
            ProfileKind::InternalEnergy => "internal_energy",
        }
    }

    /// Stage at which a profile of this kind becomes available.
    pub fn stage(self) -> ProfileStage {
        match self {
            ProfileKind::DmMass => ProfileStage::DmBuilt,
            ProfileKind::GasMass => ProfileStage::GasMassBuilt,
            ProfileKind::GasPotential => ProfileStage::GasPotentialBuilt,
            ProfileKind::InternalEnergy => ProfileStage::EnergyBuilt,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Per-Worker Profile Context
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Owns the splines of the cluster currently being sampled on one worker.
//!
//! Setup runs the stages in order:
//!   Uninitialized → DmBuilt → GasMassBuilt → GasPotentialBuilt → EnergyBuilt
//! where the gas stages only run when the baryon fraction is positive.
//! Setting up another cluster drops the previous cluster's splines first.
//!
//! The context is `Send` but not `Sync`: spline accelerators mutate on
//! every lookup, so each worker thread needs its own context.

use cluster_math::table::{ProfileTable, TableNode};
use cluster_types::config::{ClusterParams, ClusterSetConfig};
use cluster_types::error::{ProfileError, ProfileResult};
use cluster_types::state::{ProfileKind, ProfileStage};
use log::debug;

use crate::analytic::{self, GasDensityModel};
use crate::closed_form;
use crate::dm::DmMassProfile;
use crate::energy::InternalEnergyProfile;
use crate::gas::{GasMassProfile, GasPotentialProfile};
use crate::pipeline::TableReport;

/// Per-node diagnostic hook: (cluster, profile kind, node).
pub type TableObserver = Box<dyn FnMut(usize, ProfileKind, TableNode) + Send>;

pub struct ProfileContext<'a> {
    config: &'a ClusterSetConfig,
    cluster: Option<usize>,
    stage: ProfileStage,
    dm: Option<DmMassProfile>,
    gas_mass: Option<GasMassProfile>,
    gas_potential: Option<GasPotentialProfile>,
    energy: Option<InternalEnergyProfile>,
    reports: Vec<TableReport>,
    observer: Option<TableObserver>,
}

impl<'a> ProfileContext<'a> {
    pub fn new(config: &'a ClusterSetConfig) -> Self {
        Self {
            config,
            cluster: None,
            stage: ProfileStage::Uninitialized,
            dm: None,
            gas_mass: None,
            gas_potential: None,
            energy: None,
            reports: Vec::new(),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: TableObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &'a ClusterSetConfig {
        self.config
    }

    pub fn stage(&self) -> ProfileStage {
        self.stage
    }

    /// Cluster whose profiles are currently built, if any.
    pub fn cluster_index(&self) -> Option<usize> {
        self.cluster
    }

    /// Build reports of the current cluster's tables, in build order.
    pub fn reports(&self) -> &[TableReport] {
        &self.reports
    }

    /// Drop all splines and return to `Uninitialized`.
    pub fn release(&mut self) {
        self.energy = None;
        self.gas_potential = None;
        self.gas_mass = None;
        self.dm = None;
        self.reports.clear();
        self.cluster = None;
        self.stage = ProfileStage::Uninitialized;
    }

    /// Build every profile of cluster `index`. Must precede any tabulated
    /// evaluation for that cluster.
    pub fn setup_profiles(&mut self, index: usize) -> ProfileResult<()> {
        self.release();

        let config = self.config;
        let params = config.cluster(index)?;
        let global = &config.global;
        let tables = &config.tables;
        params.validate(global.has_gas(), tables)?;
        self.cluster = Some(index);

        let (dm, report) = DmMassProfile::build(index, params, global, tables)?;
        let dm: &DmMassProfile = self.dm.insert(dm);
        notify(&mut self.observer, index, ProfileKind::DmMass, dm.table());
        self.reports.push(report);
        self.stage = ProfileStage::DmBuilt;

        setup_dm_potential_profile(index);

        if !global.has_gas() {
            return Ok(());
        }

        let model = GasDensityModel::from_cluster(params, global);

        let (gas_mass, report) = GasMassProfile::build(index, &model, params.r_sample, tables)?;
        let gas_mass: &GasMassProfile = self.gas_mass.insert(gas_mass);
        notify(&mut self.observer, index, ProfileKind::GasMass, gas_mass.table());
        self.reports.push(report);
        self.stage = ProfileStage::GasMassBuilt;

        let (gas_potential, report) =
            GasPotentialProfile::build(index, gas_mass, global.grav_const, tables)?;
        let gas_potential: &GasPotentialProfile = self.gas_potential.insert(gas_potential);
        notify(&mut self.observer, index, ProfileKind::GasPotential, gas_potential.table());
        self.reports.push(report);
        self.stage = ProfileStage::GasPotentialBuilt;

        let (energy, report) =
            InternalEnergyProfile::build(index, &model, gas_mass, dm, global, tables)?;
        let energy: &InternalEnergyProfile = self.energy.insert(energy);
        notify(&mut self.observer, index, ProfileKind::InternalEnergy, energy.table());
        self.reports.push(report);
        self.stage = ProfileStage::EnergyBuilt;

        Ok(())
    }

    fn params(&self, cluster: usize) -> &'a ClusterParams {
        match self.config.cluster(cluster) {
            Ok(params) => params,
            Err(err) => panic!("{err}"),
        }
    }

    fn built<'s, T>(&self, slot: &'s Option<T>, kind: ProfileKind, cluster: usize) -> &'s T {
        match (slot, self.cluster) {
            (Some(profile), Some(bound)) if bound == cluster => profile,
            _ => panic!(
                "{}",
                ProfileError::StageOrder {
                    profile: kind.name(),
                    cluster,
                }
            ),
        }
    }

    fn bound_cluster(&self, kind: ProfileKind) -> usize {
        match self.cluster {
            Some(cluster) => cluster,
            None => panic!(
                "{}",
                ProfileError::StageOrder {
                    profile: kind.name(),
                    cluster: usize::MAX,
                }
            ),
        }
    }

    // ── Dark matter ──────────────────────────────────────────────────

    pub fn dm_density_profile(&self, cluster: usize, r: f64) -> f64 {
        let p = self.params(cluster);
        analytic::nfw_density(p.rho0_nfw, p.rs, r)
    }

    pub fn dm_mass_profile(&self, r: f64, cluster: usize) -> f64 {
        let p = self.params(cluster);
        analytic::nfw_mass(p.rho0_nfw, p.rs, r)
    }

    pub fn dm_potential_profile(&self, cluster: usize, r: f64) -> f64 {
        let p = self.params(cluster);
        analytic::hernquist_potential(self.config.global.grav_const, p.mass_dm, p.a_hernq, r)
    }

    /// Radius enclosing DM mass fraction `q` ∈ [0, 1].
    pub fn inverted_dm_mass_profile(&self, q: f64, cluster: usize) -> f64 {
        self.built(&self.dm, ProfileKind::DmMass, cluster).inverted(q)
    }

    // ── Gas ──────────────────────────────────────────────────────────

    /// Beta-model density with this configuration's cool-core setting.
    pub fn gas_density_profile(
        &self,
        r: f64,
        rho0: f64,
        beta: f64,
        rc: f64,
        rcut: f64,
        cuspy: bool,
    ) -> f64 {
        GasDensityModel::new(rho0, beta, rc, rcut, cuspy)
            .with_cool_core(self.config.global.cool_core)
            .density(r)
    }

    pub fn gas_mass_profile(&self, r: f64, cluster: usize) -> f64 {
        self.built(&self.gas_mass, ProfileKind::GasMass, cluster).mass(r)
    }

    /// Radius enclosing absolute gas mass `m` in the bound cluster.
    pub fn inverted_gas_mass_profile(&self, m: f64) -> f64 {
        let cluster = self.bound_cluster(ProfileKind::GasMass);
        self.built(&self.gas_mass, ProfileKind::GasMass, cluster).inverted(m)
    }

    pub fn gas_potential_profile(&self, cluster: usize, r: f64) -> f64 {
        self.built(&self.gas_potential, ProfileKind::GasPotential, cluster)
            .potential(r)
    }

    pub fn gas_potential_profile_23(&self, cluster: usize, r: f64) -> f64 {
        let model = GasDensityModel::from_cluster(self.params(cluster), &self.config.global);
        closed_form::potential_23(self.config.global.grav_const, &model, r)
    }

    pub fn mass_profile_23(&self, r: f64, cluster: usize) -> f64 {
        let model = GasDensityModel::from_cluster(self.params(cluster), &self.config.global);
        closed_form::mass_23(&model, r)
    }

    pub fn internal_energy_profile(&self, cluster: usize, r: f64) -> f64 {
        self.built(&self.energy, ProfileKind::InternalEnergy, cluster)
            .energy(r)
    }

    pub fn internal_energy_profile_analytic(&self, cluster: usize, r: f64) -> f64 {
        closed_form::internal_energy_analytic(self.params(cluster), &self.config.global, r)
    }

    // ── Direct access for samplers ───────────────────────────────────

    pub fn dm_mass(&self) -> Option<&DmMassProfile> {
        self.dm.as_ref()
    }

    pub fn gas_mass(&self) -> Option<&GasMassProfile> {
        self.gas_mass.as_ref()
    }

    pub fn gas_potential(&self) -> Option<&GasPotentialProfile> {
        self.gas_potential.as_ref()
    }

    pub fn internal_energy(&self) -> Option<&InternalEnergyProfile> {
        self.energy.as_ref()
    }
}

/// The DM potential is closed-form; this stage tabulates nothing.
fn setup_dm_potential_profile(index: usize) {
    debug!("cluster {index}: dm_potential is analytic, no table");
}

fn notify(
    observer: &mut Option<TableObserver>,
    index: usize,
    kind: ProfileKind,
    table: &ProfileTable,
) {
    if let Some(observer) = observer.as_mut() {
        table.for_each_node(|node| observer(index, kind, node));
    }
}

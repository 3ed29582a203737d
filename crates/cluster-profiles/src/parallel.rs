// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Profiles — Parallel Cluster Setup
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Data-parallel profile setup: one `ProfileContext` per rayon worker,
//! rebuilt for every cluster that worker picks up.

use cluster_types::config::ClusterSetConfig;
use cluster_types::error::ProfileResult;
use cluster_types::state::ProfileStage;
use log::debug;
use rayon::prelude::*;

use crate::context::ProfileContext;
use crate::pipeline::TableReport;

/// Headline numbers of one cluster's built profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub index: usize,
    pub name: String,
    pub stage: ProfileStage,
    /// Enclosed DM fraction at boxsize/2.
    pub dm_fraction_max: f64,
    /// Gas mass inside R_Sample.
    pub gas_mass: Option<f64>,
    /// Ψ(0) of the gas.
    pub central_potential: Option<f64>,
    /// u(0) of the gas.
    pub central_energy: Option<f64>,
    pub tables: Vec<TableReport>,
}

impl ClusterSummary {
    pub fn from_context(index: usize, ctx: &ProfileContext<'_>) -> Self {
        let name = ctx
            .config()
            .clusters
            .get(index)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        Self {
            index,
            name,
            stage: ctx.stage(),
            dm_fraction_max: ctx.dm_mass().map_or(0.0, |dm| dm.max_fraction()),
            gas_mass: ctx.gas_mass().map(|gas| gas.total_mass()),
            central_potential: ctx.gas_potential().map(|psi| psi.gauge()),
            central_energy: ctx.internal_energy().map(|u| u.energy(0.0)),
            tables: ctx.reports().to_vec(),
        }
    }
}

/// Set up each listed cluster on a worker-private context and hand the
/// built context to `f`. Stops at the first error.
pub fn for_each_cluster<F>(config: &ClusterSetConfig, indices: &[usize], f: F) -> ProfileResult<()>
where
    F: Fn(usize, &ProfileContext<'_>) -> ProfileResult<()> + Sync + Send,
{
    indices.par_iter().try_for_each_init(
        || ProfileContext::new(config),
        |ctx, &index| {
            ctx.setup_profiles(index)?;
            f(index, ctx)
        },
    )
}

/// Like [`for_each_cluster`], collecting one result per cluster in input order.
pub fn map_clusters<T, F>(config: &ClusterSetConfig, indices: &[usize], f: F) -> ProfileResult<Vec<T>>
where
    T: Send,
    F: Fn(usize, &ProfileContext<'_>) -> T + Sync + Send,
{
    indices
        .par_iter()
        .map_init(
            || ProfileContext::new(config),
            |ctx, &index| {
                ctx.setup_profiles(index)?;
                Ok(f(index, ctx))
            },
        )
        .collect()
}

/// Build every cluster of the set in parallel.
pub fn setup_all_parallel(config: &ClusterSetConfig) -> ProfileResult<Vec<ClusterSummary>> {
    let indices: Vec<usize> = (0..config.n_clusters()).collect();
    debug!(
        "setting up {} clusters on {} threads",
        indices.len(),
        rayon::current_num_threads()
    );
    map_clusters(config, &indices, ClusterSummary::from_context)
}

/// Build every cluster of the set on the calling thread with one context.
pub fn setup_all_serial(config: &ClusterSetConfig) -> ProfileResult<Vec<ClusterSummary>> {
    let mut ctx = ProfileContext::new(config);
    (0..config.n_clusters())
        .map(|index| {
            ctx.setup_profiles(index)?;
            Ok(ClusterSummary::from_context(index, &ctx))
        })
        .collect()
}

//! Galaxy-cluster radial profiles for initial-condition sampling.
//!
//! Dark matter: NFW mass and density, Hernquist potential.
//! Gas: single or double beta-model density with tabulated mass,
//! potential and hydrostatic internal energy.

pub mod analytic;
pub mod closed_form;
pub mod context;
pub mod dm;
pub mod energy;
pub mod gas;
pub mod parallel;
pub mod pipeline;

pub use context::{ProfileContext, TableObserver};
pub use parallel::{for_each_cluster, map_clusters, setup_all_parallel, ClusterSummary};
pub use pipeline::TableReport;

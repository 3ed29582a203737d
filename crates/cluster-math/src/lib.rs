//! Numerical primitives for SCPN Cluster Profiles.
//!
//! Adaptive quadrature, natural cubic splines and monotone radial tables.
//! Nothing here knows about cluster physics.

pub mod quadrature;
pub mod spline;
pub mod table;
pub mod tridiag;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter {field} = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Cluster index {index} out of range (have {count} clusters)")]
    UnknownCluster { index: usize, count: usize },

    #[error("Spline needs at least {required} nodes, got {got}")]
    TooFewNodes { required: usize, got: usize },

    #[error("Spline abscissa has {x} nodes but ordinate has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("Spline abscissa not strictly increasing at node {index}: {prev} >= {next}")]
    NonIncreasingAbscissa { index: usize, prev: f64, next: f64 },

    #[error("Tridiagonal system singular at row {row}")]
    SingularSystem { row: usize },

    #[error("Profile {profile} requested before it was built for cluster {cluster}")]
    StageOrder {
        profile: &'static str,
        cluster: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ProfileResult<T> = Result<T, ProfileError>;

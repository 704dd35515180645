use thiserror::Error;

use crate::post::PostStatus;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profile file {path}: {source}")]
    ProfileFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile file: {0}")]
    ProfileFileParse(#[source] serde_yaml::Error),

    #[error("invalid profile: {0}")]
    Validation(String),
}

/// Rejected post status transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostError {
    #[error("post {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: PostStatus,
        to: PostStatus,
    },
}

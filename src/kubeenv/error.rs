use crate::model::Entity;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubeenvError {
    #[error("{entity} not found: {name}")]
    NotFound { entity: Entity, name: String },

    #[error("{entity} already exists: {name}")]
    AlreadyExists { entity: Entity, name: String },

    #[error("Invalid environment name '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidName(String),

    #[error("No active environment (KUBEENV is not set)")]
    NoActiveEnvironment,

    #[error("Failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch shell '{shell}': {source}")]
    ShellLaunch {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

impl KubeenvError {
    pub fn not_found(entity: Entity, name: impl Into<String>) -> Self {
        KubeenvError::NotFound {
            entity,
            name: name.into(),
        }
    }

    pub fn already_exists(entity: Entity, name: impl Into<String>) -> Self {
        KubeenvError::AlreadyExists {
            entity,
            name: name.into(),
        }
    }

    /// Builds a `map_err` adapter that tags an `io::Error` with the path it happened on.
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| KubeenvError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, KubeenvError>;

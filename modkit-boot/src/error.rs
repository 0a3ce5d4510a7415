use modkit_config::ConfigError;
use modkit_module::{DependencyError, RegistryError};

/// Errors produced by the module boot pipeline.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("module '{0}' booted before registration")]
    NotRegistered(String),

    #[error("route registration failed for module '{module}': {reason}")]
    Route { module: String, reason: String },
}

pub type Result<T> = std::result::Result<T, BootError>;

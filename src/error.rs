use gallery_model::Fault;
use thiserror::Error;

/// Library error type for gallery rendering.
#[derive(Debug, Error)]
pub enum Error {
    /// A render precondition was violated; the document was left untouched.
    #[error(transparent)]
    Fault(#[from] Fault),

    /// Render settings parsed but describe an unusable document layout.
    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde settings error.
    #[error(transparent)]
    Settings(#[from] serde_yaml::Error),
}

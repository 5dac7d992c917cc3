use std::collections::TryReserveError;

/// An error encountered while building rain
#[derive(Debug, thiserror::Error)]
pub enum RainError {
    /// The drop field could not be allocated
    #[error("unable to allocate drop field: {0}")]
    Allocation(#[from] TryReserveError),
    /// The drop field parameters cannot produce valid drops
    #[error("invalid drop field parameters: {0}")]
    InvalidField(String),
    /// A drop would never sound or would render non-finite samples
    #[error("invalid drop: {0}")]
    InvalidDrop(String),
}

/// A result type for building rain
pub type RainResult<T> = Result<T, RainError>;

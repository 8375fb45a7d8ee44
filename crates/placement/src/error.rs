use showcase_core::error::CoreError;
use showcase_db::StoreError;

/// Error returned by every placement operation.
///
/// Wraps [`CoreError`] for domain failures (validation, ownership, missing
/// records) and [`StoreError`] for backend failures, which propagate
/// unchanged and are never retried here.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for placement operation results.
pub type PlacementResult<T> = Result<T, PlacementError>;

impl PlacementError {
    /// Stable machine-readable code for the transport layer to map onto
    /// status codes.
    pub fn code(&self) -> &'static str {
        match self {
            PlacementError::Core(core) => match core {
                CoreError::NotFound { .. } => "NOT_FOUND",
                CoreError::Validation(_) => "VALIDATION_ERROR",
                CoreError::Conflict(_) => "CONFLICT",
                CoreError::Unauthorized(_) => "UNAUTHORIZED",
                CoreError::Forbidden(_) => "FORBIDDEN",
                CoreError::Inconsistent(_) => "INCONSISTENT_STATE",
                CoreError::Internal(_) => "INTERNAL_ERROR",
            },
            PlacementError::Store(store) => match store {
                StoreError::Cancelled => "CANCELLED",
                StoreError::Unavailable(_) | StoreError::Io(_) => "STORE_UNAVAILABLE",
                StoreError::InvalidKey(_)
                | StoreError::Malformed { .. }
                | StoreError::Serialization(_) => "INTERNAL_ERROR",
            },
        }
    }
}

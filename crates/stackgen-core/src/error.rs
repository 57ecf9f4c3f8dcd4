//! Error types for the stackgen core.

/// Core error type for stackgen.
#[derive(Debug, thiserror::Error)]
pub enum StackgenError {
    /// Invalid AWS account ID format.
    #[error("invalid AWS account ID: {0} (must be 12-digit numeric string)")]
    InvalidAccountId(String),

    /// Invalid environment identifier.
    #[error("invalid environment name: {0} (must be 1-32 lowercase letters, digits, or hyphens)")]
    InvalidEnvironmentName(String),
}

/// Convenience result type for stackgen core operations.
pub type StackgenResult<T> = Result<T, StackgenError>;

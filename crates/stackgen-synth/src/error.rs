//! Synthesis error types.
//!
//! Every failure stackgen can detect on its own, before a template reaches the
//! deployment tool. Errors carry the offending value so the CLI can report
//! them without further context.

use std::path::PathBuf;

/// Synthesis error type.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    // -----------------------------------------------------------------------
    // Naming errors
    // -----------------------------------------------------------------------
    /// The stack name is not a valid CloudFormation stack name.
    #[error("Invalid stack name: {name}: {reason}")]
    InvalidStackName {
        /// The invalid name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A construct or output ID is not valid.
    #[error("Invalid construct ID: {id}: {reason}")]
    InvalidConstructId {
        /// The invalid ID.
        id: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A construct or output ID is used twice in one stack.
    #[error("Construct ID already used in this stack: {0}")]
    DuplicateConstructId(String),

    /// The bucket name violates the S3 naming rules.
    #[error("Invalid bucket name: {name}: {reason}")]
    InvalidBucketName {
        /// The invalid name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Two buckets in one stack share a name.
    #[error("Bucket name already used in this stack: {0}")]
    DuplicateBucketName(String),

    // -----------------------------------------------------------------------
    // Function limits
    // -----------------------------------------------------------------------
    /// Function timeout outside the platform limits.
    #[error("Invalid timeout for function {function}: {seconds}s (must be {min}..={max})")]
    InvalidTimeout {
        /// Construct ID of the function.
        function: String,
        /// Requested timeout.
        seconds: u32,
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },

    /// Function memory size outside the platform limits.
    #[error("Invalid memory size for function {function}: {megabytes} MB (must be {min}..={max})")]
    InvalidMemorySize {
        /// Construct ID of the function.
        function: String,
        /// Requested memory.
        megabytes: u32,
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },

    /// Handler entry point is empty or malformed.
    #[error("Invalid handler for function {function}: {handler:?}")]
    InvalidHandler {
        /// Construct ID of the function.
        function: String,
        /// The rejected handler.
        handler: String,
    },

    /// Log retention not accepted by CloudWatch Logs.
    #[error("Invalid log retention: {0} days")]
    InvalidRetention(u32),

    // -----------------------------------------------------------------------
    // Event bindings
    // -----------------------------------------------------------------------
    /// Event filter rule is not usable.
    #[error("Invalid event filter on {binding}: {reason}")]
    InvalidEventFilter {
        /// Construct ID of the binding.
        binding: String,
        /// Why it was rejected.
        reason: String,
    },

    // -----------------------------------------------------------------------
    // Graph errors
    // -----------------------------------------------------------------------
    /// A resource refers to a logical ID that is not in the stack.
    #[error("Resource {from} refers to unknown resource {target}")]
    DanglingReference {
        /// Logical ID of the referring resource.
        from: String,
        /// The missing logical ID.
        target: String,
    },

    /// Resources depend on each other in a loop.
    #[error("Dependency cycle: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),

    // -----------------------------------------------------------------------
    // Assets and output
    // -----------------------------------------------------------------------
    /// An asset directory could not be read.
    #[error("Cannot read asset {}: {source}", .path.display())]
    Asset {
        /// The asset path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error while writing synthesized output.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON rendering error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for synthesis.
pub type SynthResult<T> = Result<T, SynthError>;

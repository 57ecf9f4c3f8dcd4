//! Error types for the translation pipeline stack.

use std::path::PathBuf;

use stackgen_synth::SynthError;

/// Translation stack error type.
#[derive(Debug, thiserror::Error)]
pub enum TranslateStackError {
    /// Source language is neither `auto` nor a language code.
    #[error("invalid source language: {0:?} (expected `auto` or a code such as `en` or `pt-PT`)")]
    InvalidSourceLanguage(String),

    /// Target language is not a language code.
    #[error("invalid target language: {0:?} (expected a code such as `es` or `zh-TW`)")]
    InvalidTargetLanguage(String),

    /// Fixed source language equals the target language.
    #[error("source and target language are both {0}")]
    SameLanguage(String),

    /// The props file could not be read.
    #[error("cannot read stack props from {}: {source}", .path.display())]
    PropsIo {
        /// The props file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The props file is not valid JSON for [`TranslationStackProps`](crate::TranslationStackProps).
    #[error("invalid stack props in {}: {source}", .path.display())]
    PropsFormat {
        /// The props file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A bucket name derived from the environment breaks the S3 naming
    /// rules, e.g. because the environment name is long.
    #[error("derived bucket name {name} is invalid ({source}); set {variable} to choose one")]
    DerivedBucketName {
        /// The derived name.
        name: String,
        /// Variable that sets the name explicitly.
        variable: &'static str,
        /// Why the name was rejected.
        #[source]
        source: SynthError,
    },

    /// Stack construction or synthesis failed.
    #[error(transparent)]
    Synth(#[from] SynthError),
}

/// Convenience result type for the translation stack.
pub type TranslateStackResult<T> = Result<T, TranslateStackError>;

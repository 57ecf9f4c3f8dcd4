//! Inputs of the translation pipeline stack.
//!
//! Props come from three layers, later ones winning: built-in defaults, an
//! optional JSON file (camelCase keys, every key optional), and a handful of
//! environment variables.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stackgen_core::DeploymentEnv;
use stackgen_model::resources::lambda::Runtime;
use stackgen_synth::CodeLocation;
use stackgen_synth::constructs::RemovalPolicy;
use stackgen_synth::validation::validate_bucket_name;
use typed_builder::TypedBuilder;

use crate::error::{TranslateStackError, TranslateStackResult};

/// Default source language: detect.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "auto";

/// Default target language.
pub const DEFAULT_TARGET_LANGUAGE: &str = "es";

/// Default function entry point.
pub const DEFAULT_HANDLER: &str = "index.handler";

/// Default function memory, in megabytes.
pub const DEFAULT_MEMORY_SIZE: u32 = 256;

/// Default function timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u32 = 60;

/// Default log retention, in days.
pub const DEFAULT_LOG_RETENTION_DAYS: u32 = 14;

/// Default function code directory.
pub const DEFAULT_FUNCTION_CODE_DIR: &str = "assets/function";

/// Default layer code directory.
pub const DEFAULT_LAYER_CODE_DIR: &str = "assets/layer";

/// Inputs of [`build_translation_stack`](crate::build_translation_stack).
///
/// # Examples
///
/// ```
/// use stackgen_translate::TranslationStackProps;
///
/// let props = TranslationStackProps::builder().target_language("fr").build();
/// assert_eq!(props.source_language, "auto");
/// assert_eq!(props.target_language, "fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationStackProps {
    /// Input bucket name; derived from the environment when unset.
    #[builder(default, setter(strip_option, into))]
    pub input_bucket_name: Option<String>,
    /// Output bucket name; derived from the environment when unset.
    #[builder(default, setter(strip_option, into))]
    pub output_bucket_name: Option<String>,
    /// `auto` or a language code.
    #[builder(default = String::from(DEFAULT_SOURCE_LANGUAGE), setter(into))]
    pub source_language: String,
    /// Language code to translate into.
    #[builder(default = String::from(DEFAULT_TARGET_LANGUAGE), setter(into))]
    pub target_language: String,
    /// Function runtime.
    #[builder(default)]
    pub runtime: Runtime,
    /// Function entry point.
    #[builder(default = String::from(DEFAULT_HANDLER), setter(into))]
    pub handler: String,
    /// Function memory, in megabytes.
    #[builder(default = DEFAULT_MEMORY_SIZE)]
    pub memory_size: u32,
    /// Function timeout, in seconds.
    #[builder(default = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u32,
    /// Function code.
    #[builder(default = CodeLocation::Directory(PathBuf::from(DEFAULT_FUNCTION_CODE_DIR)))]
    pub function_code: CodeLocation,
    /// Layer code.
    #[builder(default = CodeLocation::Directory(PathBuf::from(DEFAULT_LAYER_CODE_DIR)))]
    pub layer_code: CodeLocation,
    /// Function log retention, in days; `None` leaves logs to the default
    /// log group, which never expires.
    #[builder(default = Some(DEFAULT_LOG_RETENTION_DAYS))]
    pub log_retention_days: Option<u32>,
    /// Removal policy of both buckets.
    #[builder(default)]
    pub removal_policy: RemovalPolicy,
    /// Extra tags for every resource.
    #[builder(default)]
    pub tags: BTreeMap<String, String>,
    /// Only translate objects whose key ends with this suffix, e.g. `.txt`.
    #[builder(default, setter(strip_option, into))]
    pub suffix_filter: Option<String>,
}

impl Default for TranslationStackProps {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TranslationStackProps {
    /// Read props from a JSON file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`TranslateStackError::PropsIo`] if the file cannot be read,
    /// [`TranslateStackError::PropsFormat`] if it is not valid props JSON.
    pub fn from_file(path: &Path) -> TranslateStackResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| TranslateStackError::PropsIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| TranslateStackError::PropsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override props from environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `INPUT_BUCKET_NAME` | `input_bucket_name` |
    /// | `OUTPUT_BUCKET_NAME` | `output_bucket_name` |
    /// | `SOURCE_LANGUAGE` | `source_language` |
    /// | `TARGET_LANGUAGE` | `target_language` |
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Override props from an arbitrary variable lookup.
    #[must_use]
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("INPUT_BUCKET_NAME") {
            self.input_bucket_name = Some(v);
        }
        if let Some(v) = lookup("OUTPUT_BUCKET_NAME") {
            self.output_bucket_name = Some(v);
        }
        if let Some(v) = lookup("SOURCE_LANGUAGE") {
            self.source_language = v;
        }
        if let Some(v) = lookup("TARGET_LANGUAGE") {
            self.target_language = v;
        }
        self
    }

    /// Input bucket name, explicit or derived from the environment.
    ///
    /// # Errors
    ///
    /// [`TranslateStackError::DerivedBucketName`] if no name is set and the
    /// derived one breaks the S3 naming rules. An explicit name is returned
    /// as is and checked when the bucket is added to the stack.
    pub fn input_bucket_name(&self, env: &DeploymentEnv) -> TranslateStackResult<String> {
        resolve_bucket_name(self.input_bucket_name.as_deref(), "input", "INPUT_BUCKET_NAME", env)
    }

    /// Output bucket name, explicit or derived from the environment.
    ///
    /// # Errors
    ///
    /// Same as [`TranslationStackProps::input_bucket_name`].
    pub fn output_bucket_name(&self, env: &DeploymentEnv) -> TranslateStackResult<String> {
        resolve_bucket_name(self.output_bucket_name.as_deref(), "output", "OUTPUT_BUCKET_NAME", env)
    }
}

fn resolve_bucket_name(
    explicit: Option<&str>,
    role: &str,
    variable: &'static str,
    env: &DeploymentEnv,
) -> TranslateStackResult<String> {
    if let Some(name) = explicit {
        return Ok(name.to_owned());
    }
    let name = default_bucket_name(role, env);
    validate_bucket_name(&name).map_err(|source| TranslateStackError::DerivedBucketName {
        name: name.clone(),
        variable,
        source,
    })?;
    Ok(name)
}

/// `translation-<role>-<env>-<region>`, plus `-<account>` when the account
/// is pinned.
fn default_bucket_name(role: &str, env: &DeploymentEnv) -> String {
    match &env.account {
        Some(account) => format!("translation-{role}-{}-{}-{account}", env.name, env.region),
        None => format!("translation-{role}-{}-{}", env.name, env.region),
    }
}

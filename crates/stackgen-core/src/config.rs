//! Global configuration for stackgen.
//!
//! All configuration is driven by environment variables. Values are kept as
//! plain strings here and validated when turned into a [`DeploymentEnv`].

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::types::{AccountId, AwsRegion, DeploymentEnv, EnvironmentName};
use crate::StackgenResult;

/// Global configuration for stackgen.
///
/// # Examples
///
/// ```
/// use stackgen_core::StackgenConfig;
///
/// let config = StackgenConfig::default();
/// assert_eq!(config.environment, "dev");
/// assert_eq!(config.outdir, "stackgen.out");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct StackgenConfig {
    /// Target environment identifier.
    #[builder(default = String::from(EnvironmentName::DEFAULT))]
    pub environment: String,
    /// Target AWS region.
    #[builder(default = String::from(AwsRegion::DEFAULT))]
    pub region: String,
    /// Target AWS account, if pinned.
    #[builder(default)]
    pub account: Option<String>,
    /// Log level filter.
    #[builder(default = String::from("info"))]
    pub log_level: String,
    /// Directory synthesized templates are written to.
    #[builder(default = String::from("stackgen.out"))]
    pub outdir: String,
}

impl Default for StackgenConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl StackgenConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `STACKGEN_ENV` | `dev` |
    /// | `STACKGEN_REGION` (falls back to `AWS_REGION`) | `us-east-1` |
    /// | `STACKGEN_ACCOUNT` | *(unset)* |
    /// | `LOG_LEVEL` | `info` |
    /// | `STACKGEN_OUTDIR` | `stackgen.out` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("STACKGEN_ENV") {
            config.environment = v;
        }
        if let Some(v) = lookup("STACKGEN_REGION").or_else(|| lookup("AWS_REGION")) {
            config.region = v;
        }
        if let Some(v) = lookup("STACKGEN_ACCOUNT") {
            config.account = Some(v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("STACKGEN_OUTDIR") {
            config.outdir = v;
        }

        config
    }

    /// Validate and convert into a [`DeploymentEnv`].
    pub fn deployment_env(&self) -> StackgenResult<DeploymentEnv> {
        let mut env = DeploymentEnv::new(EnvironmentName::new(self.environment.as_str())?)
            .with_region(AwsRegion::new(self.region.as_str()));
        if let Some(account) = &self.account {
            env = env.with_account(AccountId::new(account.as_str())?);
        }
        Ok(env)
    }
}

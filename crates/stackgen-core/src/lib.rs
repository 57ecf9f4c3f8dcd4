//! Core types, configuration, and errors for stackgen.
//!
//! This crate provides the building blocks shared by the template model, the
//! construct layer, and the CLI: the deployment environment a stack targets,
//! global configuration, and the core error type.

mod config;
mod error;
mod types;

pub use config::StackgenConfig;
pub use error::{StackgenError, StackgenResult};
pub use types::{AccountId, AwsRegion, DeploymentEnv, EnvironmentName};

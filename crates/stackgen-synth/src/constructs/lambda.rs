//! Lambda layer and function constructs.

use std::collections::BTreeMap;

use stackgen_model::Expr;
use stackgen_model::resources::lambda::{
    Architecture, Environment, FunctionProperties, LayerVersionProperties, LoggingConfig, Runtime,
    S3Code,
};
use stackgen_model::resources::logs::LogGroupProperties;
use typed_builder::TypedBuilder;

use super::{LayerRef, RoleRef};
use crate::asset::CodeLocation;
use crate::error::SynthResult;
use crate::logical_id::PRIMARY;
use crate::render::{RenderContext, ResourceOptions};
use crate::validation::{
    validate_handler, validate_memory_size, validate_retention_days, validate_timeout,
};

/// Declaration of a Lambda layer version.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct LayerSpec {
    /// Layer name; generated by CloudFormation when unset.
    #[builder(default, setter(strip_option, into))]
    pub layer_name: Option<String>,
    /// Layer description.
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    /// Layer content.
    pub code: CodeLocation,
    /// Runtimes the layer declares itself compatible with.
    #[builder(default)]
    pub compatible_runtimes: Vec<Runtime>,
}

impl LayerSpec {
    pub(crate) fn render(
        &self,
        id: &str,
        code: &S3Code,
        ctx: &mut RenderContext<'_>,
    ) -> SynthResult<()> {
        let props = LayerVersionProperties {
            layer_name: self.layer_name.clone(),
            description: self.description.clone(),
            content: code.clone(),
            compatible_runtimes: self.compatible_runtimes.clone(),
        };
        ctx.put(&[id, PRIMARY], &props, ResourceOptions::default())?;
        Ok(())
    }
}

/// Declaration of a Lambda function.
///
/// # Examples
///
/// ```no_run
/// # fn role() -> stackgen_synth::constructs::RoleRef { unimplemented!() }
/// use stackgen_synth::asset::CodeLocation;
/// use stackgen_synth::constructs::FunctionSpec;
///
/// let spec = FunctionSpec::builder()
///     .handler("app.handler")
///     .code(CodeLocation::Directory("lambda".into()))
///     .role(role())
///     .timeout_seconds(30)
///     .build();
/// assert_eq!(spec.memory_size, 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct FunctionSpec {
    /// Function name; generated by CloudFormation when unset.
    #[builder(default, setter(strip_option, into))]
    pub function_name: Option<String>,
    /// Function description.
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    /// Runtime.
    #[builder(default)]
    pub runtime: Runtime,
    /// Entry point, e.g. `app.handler`.
    #[builder(setter(into))]
    pub handler: String,
    /// Deployment package.
    pub code: CodeLocation,
    /// Execution role.
    pub role: RoleRef,
    /// Timeout in seconds.
    #[builder(default = 3)]
    pub timeout_seconds: u32,
    /// Memory in megabytes.
    #[builder(default = 128)]
    pub memory_size: u32,
    /// Instruction set architecture.
    #[builder(default)]
    pub architecture: Architecture,
    /// Layers, in the order they are applied.
    #[builder(default)]
    pub layers: Vec<LayerRef>,
    /// Environment variables.
    #[builder(default)]
    pub environment: BTreeMap<String, Expr>,
    /// Give the function its own log group with this retention.
    #[builder(default, setter(strip_option))]
    pub log_retention_days: Option<u32>,
}

impl FunctionSpec {
    /// Check the function against Lambda's limits.
    pub(crate) fn validate(&self, id: &str) -> SynthResult<()> {
        validate_timeout(id, self.timeout_seconds)?;
        validate_memory_size(id, self.memory_size)?;
        validate_handler(id, &self.handler)?;
        if let Some(days) = self.log_retention_days {
            validate_retention_days(days)?;
        }
        Ok(())
    }

    pub(crate) fn render(
        &self,
        id: &str,
        code: &S3Code,
        ctx: &mut RenderContext<'_>,
    ) -> SynthResult<()> {
        let logging_config = match self.log_retention_days {
            Some(days) => {
                let log_group = LogGroupProperties {
                    log_group_name: None,
                    retention_in_days: Some(days),
                    tags: ctx.tags(),
                };
                let log_group_id = ctx.put(&[id, "LogGroup"], &log_group, ResourceOptions::default())?;
                Some(LoggingConfig {
                    log_group: Expr::reference(log_group_id),
                })
            }
            None => None,
        };

        let props = FunctionProperties {
            function_name: self.function_name.clone(),
            description: self.description.clone(),
            runtime: self.runtime,
            handler: self.handler.clone(),
            code: code.clone(),
            role: self.role.arn(),
            timeout: self.timeout_seconds,
            memory_size: self.memory_size,
            architectures: vec![self.architecture],
            layers: self.layers.iter().map(LayerRef::arn).collect(),
            environment: (!self.environment.is_empty()).then(|| Environment {
                variables: self.environment.clone(),
            }),
            logging_config,
            tags: ctx.tags(),
        };
        ctx.put(&[id, PRIMARY], &props, ResourceOptions::default())?;
        Ok(())
    }
}

//! IAM role and inline policy constructs.

use stackgen_model::resources::iam::{PolicyProperties, RoleProperties, managed_policy_arn};
use stackgen_model::{PolicyDocument, Statement};
use typed_builder::TypedBuilder;

use super::RoleRef;
use crate::error::SynthResult;
use crate::logical_id::PRIMARY;
use crate::render::{RenderContext, ResourceOptions};

/// Service principal Lambda functions run as.
pub const LAMBDA_SERVICE_PRINCIPAL: &str = "lambda.amazonaws.com";

/// Managed policy granting CloudWatch Logs write access to a function.
pub const LAMBDA_BASIC_EXECUTION: &str = "service-role/AWSLambdaBasicExecutionRole";

/// Declaration of an IAM role.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RoleSpec {
    /// Service principal allowed to assume the role.
    #[builder(default = String::from(LAMBDA_SERVICE_PRINCIPAL), setter(into))]
    pub assumed_by: String,
    /// AWS managed policies by name, e.g. `service-role/AWSLambdaBasicExecutionRole`.
    #[builder(default)]
    pub managed_policies: Vec<String>,
    /// Role description.
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
}

impl RoleSpec {
    pub(crate) fn render(&self, id: &str, ctx: &mut RenderContext<'_>) -> SynthResult<()> {
        let props = RoleProperties {
            assume_role_policy_document: PolicyDocument::new(vec![Statement::assume_role(
                &self.assumed_by,
            )]),
            description: self.description.clone(),
            managed_policy_arns: self
                .managed_policies
                .iter()
                .map(|name| managed_policy_arn(name))
                .collect(),
            tags: ctx.tags(),
        };
        ctx.put(&[id, PRIMARY], &props, ResourceOptions::default())?;
        Ok(())
    }
}

/// Declaration of an inline policy attached to one or more roles.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct PolicySpec {
    /// Policy name; defaults to the policy's logical ID.
    #[builder(default, setter(strip_option, into))]
    pub policy_name: Option<String>,
    /// Statements granted.
    pub statements: Vec<Statement>,
    /// Roles the policy is attached to.
    pub roles: Vec<RoleRef>,
}

impl PolicySpec {
    pub(crate) fn render(&self, id: &str, ctx: &mut RenderContext<'_>) -> SynthResult<()> {
        let path = [id, PRIMARY];
        let props = PolicyProperties {
            policy_name: self
                .policy_name
                .clone()
                .unwrap_or_else(|| crate::logical_id::logical_id(&path)),
            policy_document: PolicyDocument::new(self.statements.clone()),
            roles: self.roles.iter().map(RoleRef::name).collect(),
        };
        ctx.put(&path, &props, ResourceOptions::default())?;
        Ok(())
    }
}

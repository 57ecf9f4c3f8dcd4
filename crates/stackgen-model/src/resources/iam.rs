//! `AWS::IAM::Role` and `AWS::IAM::Policy`.

use serde::Serialize;

use super::{ResourceProperties, Tag};
use crate::{Expr, PolicyDocument};

/// Properties of `AWS::IAM::Role`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleProperties {
    /// Trust policy: who may assume the role.
    pub assume_role_policy_document: PolicyDocument,
    /// Role description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ARNs of attached managed policies.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub managed_policy_arns: Vec<Expr>,
    /// Resource tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl ResourceProperties for RoleProperties {
    const RESOURCE_TYPE: &'static str = "AWS::IAM::Role";
}

/// Properties of `AWS::IAM::Policy`, an inline policy attached to roles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyProperties {
    /// Policy name, unique per role.
    pub policy_name: String,
    /// Granted permissions.
    pub policy_document: PolicyDocument,
    /// Names of the roles the policy is attached to.
    pub roles: Vec<Expr>,
}

impl ResourceProperties for PolicyProperties {
    const RESOURCE_TYPE: &'static str = "AWS::IAM::Policy";
}

/// Partition-aware ARN of an AWS managed policy, e.g.
/// `service-role/AWSLambdaBasicExecutionRole`.
#[must_use]
pub fn managed_policy_arn(name: &str) -> Expr {
    Expr::sub(format!("arn:${{AWS::Partition}}:iam::aws:policy/{name}"))
}

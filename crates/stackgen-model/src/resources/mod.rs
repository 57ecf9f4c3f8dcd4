//! Typed resource properties.
//!
//! Each struct mirrors the `Properties` block of one CloudFormation resource
//! type, limited to the properties stackgen emits.

pub mod iam;
pub mod lambda;
pub mod logs;
pub mod s3;

use serde::Serialize;

/// Properties of a CloudFormation resource type.
pub trait ResourceProperties: Serialize {
    /// The CloudFormation type name, e.g. `AWS::S3::Bucket`.
    const RESOURCE_TYPE: &'static str;
}

/// A resource tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl Tag {
    /// Create a tag.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

//! S3 bucket construct.
//!
//! Secure by default: versioned, SSE-S3 encrypted, all public access blocked,
//! TLS enforced by a bucket policy, and retained when removed from the stack.

use serde::{Deserialize, Serialize};
use stackgen_model::resources::s3::{
    BucketEncryption, BucketPolicyProperties, BucketProperties, LambdaConfiguration,
    NotificationConfiguration, PublicAccessBlockConfiguration, SseAlgorithm,
    VersioningConfiguration, VersioningStatus,
};
use stackgen_model::{DeletionPolicy, Expr, PolicyDocument, Statement};
use tracing::warn;
use typed_builder::TypedBuilder;

use super::BucketRef;
use crate::error::SynthResult;
use crate::logical_id::PRIMARY;
use crate::render::{RenderContext, ResourceOptions};

/// Default bucket encryption.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncryptionMode {
    /// SSE-S3 (`AES256`).
    #[default]
    S3Managed,
    /// SSE-KMS with the AWS managed key.
    KmsManaged,
    /// SSE-KMS with a customer managed key, by ARN or alias.
    Kms(String),
}

/// What happens to a resource when it leaves the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RemovalPolicy {
    /// Keep it.
    #[default]
    Retain,
    /// Delete it. A bucket that still holds objects will fail to delete.
    Destroy,
}

impl From<RemovalPolicy> for DeletionPolicy {
    fn from(value: RemovalPolicy) -> Self {
        match value {
            RemovalPolicy::Retain => Self::Retain,
            RemovalPolicy::Destroy => Self::Delete,
        }
    }
}

/// Declaration of one S3 bucket.
///
/// # Examples
///
/// ```
/// use stackgen_synth::constructs::BucketSpec;
///
/// let spec = BucketSpec::builder().bucket_name("translate-input").build();
/// assert!(spec.versioned);
/// assert!(spec.enforce_tls);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct BucketSpec {
    /// Globally unique bucket name.
    #[builder(setter(into))]
    pub bucket_name: String,
    /// Keep every object version.
    #[builder(default = true)]
    pub versioned: bool,
    /// Default encryption.
    #[builder(default)]
    pub encryption: EncryptionMode,
    /// Block all four kinds of public access.
    #[builder(default = true)]
    pub block_public_access: bool,
    /// Deny requests that do not use TLS.
    #[builder(default = true)]
    pub enforce_tls: bool,
    /// Removal policy.
    #[builder(default)]
    pub removal_policy: RemovalPolicy,
}

/// A notification a binding attaches to a bucket.
#[derive(Debug, Clone)]
pub(crate) struct NotificationTarget {
    pub configuration: LambdaConfiguration,
    /// Logical ID of the invoke permission that must exist first.
    pub permission_id: String,
}

impl BucketSpec {
    fn encryption(&self) -> BucketEncryption {
        match &self.encryption {
            EncryptionMode::S3Managed => BucketEncryption::with_default(SseAlgorithm::Aes256, None),
            EncryptionMode::KmsManaged => BucketEncryption::with_default(SseAlgorithm::AwsKms, None),
            EncryptionMode::Kms(key) => {
                BucketEncryption::with_default(SseAlgorithm::AwsKms, Some(key.clone()))
            }
        }
    }

    pub(crate) fn render(
        &self,
        id: &str,
        notifications: &[NotificationTarget],
        ctx: &mut RenderContext<'_>,
    ) -> SynthResult<()> {
        if self.removal_policy == RemovalPolicy::Destroy {
            warn!(bucket = %self.bucket_name, "bucket is deleted with the stack");
        }

        let notification_configuration = (!notifications.is_empty()).then(|| NotificationConfiguration {
            lambda_configurations: notifications
                .iter()
                .map(|n| n.configuration.clone())
                .collect(),
        });

        let props = BucketProperties {
            bucket_name: Some(self.bucket_name.clone()),
            versioning_configuration: self.versioned.then_some(VersioningConfiguration {
                status: VersioningStatus::Enabled,
            }),
            bucket_encryption: Some(self.encryption()),
            public_access_block_configuration: self
                .block_public_access
                .then_some(PublicAccessBlockConfiguration::BLOCK_ALL),
            notification_configuration,
            tags: ctx.tags(),
        };

        let mut options = ResourceOptions::retained(self.removal_policy.into());
        options
            .depends_on
            .extend(notifications.iter().map(|n| n.permission_id.clone()));
        let bucket_id = ctx.put(&[id, PRIMARY], &props, options)?;

        if self.enforce_tls {
            let arn = Expr::get_att(&bucket_id, "Arn");
            let objects = Expr::Join(String::new(), vec![arn.clone(), Expr::lit("/*")]);
            let policy = BucketPolicyProperties {
                bucket: Expr::reference(&bucket_id),
                policy_document: PolicyDocument::new(vec![
                    Statement::deny_insecure_transport(vec![arn, objects])
                        .with_sid("DenyInsecureTransport"),
                ]),
            };
            ctx.put(&[id, "Policy"], &policy, ResourceOptions::default())?;
        }

        Ok(())
    }

    pub(crate) fn handle(&self, id: &str, logical_id: String) -> BucketRef {
        BucketRef {
            construct_id: id.to_owned(),
            logical_id,
            bucket_name: self.bucket_name.clone(),
        }
    }
}

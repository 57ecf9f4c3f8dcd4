//! `AWS::S3::Bucket` and `AWS::S3::BucketPolicy`.

use serde::Serialize;

use super::{ResourceProperties, Tag};
use crate::{Expr, PolicyDocument};

/// Bucket versioning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum VersioningStatus {
    /// Default variant.
    #[default]
    Enabled,
    /// Versioning paused; existing versions kept.
    Suspended,
}

/// Server-side encryption algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SseAlgorithm {
    /// Default variant.
    #[default]
    #[serde(rename = "AES256")]
    Aes256,
    /// SSE-KMS.
    #[serde(rename = "aws:kms")]
    AwsKms,
    /// Dual-layer SSE-KMS.
    #[serde(rename = "aws:kms:dsse")]
    AwsKmsDsse,
}

impl SseAlgorithm {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256 => "AES256",
            Self::AwsKms => "aws:kms",
            Self::AwsKmsDsse => "aws:kms:dsse",
        }
    }
}

impl std::fmt::Display for SseAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Properties of `AWS::S3::Bucket`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketProperties {
    /// Bucket name; generated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    /// Versioning state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versioning_configuration: Option<VersioningConfiguration>,
    /// Default encryption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_encryption: Option<BucketEncryption>,
    /// Public access settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_access_block_configuration: Option<PublicAccessBlockConfiguration>,
    /// Event notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_configuration: Option<NotificationConfiguration>,
    /// Resource tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl ResourceProperties for BucketProperties {
    const RESOURCE_TYPE: &'static str = "AWS::S3::Bucket";
}

/// `VersioningConfiguration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersioningConfiguration {
    /// Versioning status.
    pub status: VersioningStatus,
}

/// `BucketEncryption`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketEncryption {
    /// Encryption rules; one in practice.
    pub server_side_encryption_configuration: Vec<ServerSideEncryptionRule>,
}

impl BucketEncryption {
    /// A single default-encryption rule.
    #[must_use]
    pub fn with_default(algorithm: SseAlgorithm, kms_master_key_id: Option<String>) -> Self {
        let bucket_key_enabled = (algorithm != SseAlgorithm::Aes256).then_some(true);
        Self {
            server_side_encryption_configuration: vec![ServerSideEncryptionRule {
                server_side_encryption_by_default: ServerSideEncryptionByDefault {
                    sse_algorithm: algorithm,
                    kms_master_key_id,
                },
                bucket_key_enabled,
            }],
        }
    }
}

/// `ServerSideEncryptionRule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerSideEncryptionRule {
    /// Encryption applied to new objects.
    pub server_side_encryption_by_default: ServerSideEncryptionByDefault,
    /// Use an S3 bucket key to cut KMS requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_key_enabled: Option<bool>,
}

/// `ServerSideEncryptionByDefault`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSideEncryptionByDefault {
    /// Algorithm.
    #[serde(rename = "SSEAlgorithm")]
    pub sse_algorithm: SseAlgorithm,
    /// KMS key; the AWS managed key when unset.
    #[serde(rename = "KMSMasterKeyID", skip_serializing_if = "Option::is_none")]
    pub kms_master_key_id: Option<String>,
}

/// `PublicAccessBlockConfiguration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicAccessBlockConfiguration {
    /// Reject requests that add public ACLs.
    pub block_public_acls: bool,
    /// Reject bucket policies that grant public access.
    pub block_public_policy: bool,
    /// Ignore existing public ACLs.
    pub ignore_public_acls: bool,
    /// Limit public-policy buckets to service principals and the owner.
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlockConfiguration {
    /// Every public access setting blocked.
    pub const BLOCK_ALL: Self = Self {
        block_public_acls: true,
        block_public_policy: true,
        ignore_public_acls: true,
        restrict_public_buckets: true,
    };

    /// Whether every setting is blocked.
    #[must_use]
    pub fn blocks_all(&self) -> bool {
        *self == Self::BLOCK_ALL
    }
}

/// `NotificationConfiguration`, Lambda targets only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationConfiguration {
    /// Function targets.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lambda_configurations: Vec<LambdaConfiguration>,
}

/// `LambdaConfiguration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LambdaConfiguration {
    /// Event type, e.g. `s3:ObjectCreated:*`.
    pub event: String,
    /// Function ARN.
    pub function: Expr,
    /// Object key filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<NotificationFilter>,
}

/// `NotificationFilter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationFilter {
    /// Key name rules.
    #[serde(rename = "S3Key")]
    pub s3_key: S3KeyFilter,
}

/// `S3KeyFilter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3KeyFilter {
    /// Prefix and suffix rules; all must match.
    pub rules: Vec<FilterRule>,
}

/// `FilterRule`: `prefix` or `suffix` match on the object key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterRule {
    /// `prefix` or `suffix`.
    pub name: String,
    /// Value the key must start or end with.
    pub value: String,
}

/// Properties of `AWS::S3::BucketPolicy`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketPolicyProperties {
    /// Name of the bucket the policy applies to.
    pub bucket: Expr,
    /// Policy statements.
    pub policy_document: PolicyDocument,
}

impl ResourceProperties for BucketPolicyProperties {
    const RESOURCE_TYPE: &'static str = "AWS::S3::BucketPolicy";
}

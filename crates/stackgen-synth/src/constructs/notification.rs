//! S3 event to Lambda bindings.
//!
//! A binding renders as two things: an `AWS::Lambda::Permission` letting the
//! bucket invoke the function, and a `LambdaConfiguration` entry in the
//! bucket's `NotificationConfiguration`. S3 checks the permission when the
//! notification is written, so the bucket depends on the permission. The
//! permission scopes itself to the bucket by a name-derived ARN instead of a
//! reference to the bucket, which would close a cycle.

use serde::{Deserialize, Serialize};
use stackgen_model::Expr;
use stackgen_model::intrinsic::PSEUDO_ACCOUNT_ID;
use stackgen_model::resources::lambda::PermissionProperties;
use stackgen_model::resources::s3::{FilterRule, LambdaConfiguration, NotificationFilter, S3KeyFilter};
use typed_builder::TypedBuilder;

use super::bucket::NotificationTarget;
use super::{BucketRef, FunctionRef};
use crate::error::{SynthError, SynthResult};
use crate::logical_id::logical_id;
use crate::render::{RenderContext, ResourceOptions};

/// Path leaf of a binding's invoke permission.
pub(crate) const PERMISSION: &str = "Permission";

/// Principal S3 invokes functions as.
pub const S3_SERVICE_PRINCIPAL: &str = "s3.amazonaws.com";

/// Maximum length of a key filter value.
const MAX_FILTER_LEN: usize = 1024;

/// S3 event types a binding can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum S3EventType {
    /// Any object creation.
    #[default]
    #[serde(rename = "s3:ObjectCreated:*")]
    ObjectCreated,
    /// Object created by `PutObject`.
    #[serde(rename = "s3:ObjectCreated:Put")]
    ObjectCreatedPut,
    /// Object created by a browser form `POST`.
    #[serde(rename = "s3:ObjectCreated:Post")]
    ObjectCreatedPost,
    /// Object created by `CopyObject`.
    #[serde(rename = "s3:ObjectCreated:Copy")]
    ObjectCreatedCopy,
    /// Object created by completing a multipart upload.
    #[serde(rename = "s3:ObjectCreated:CompleteMultipartUpload")]
    ObjectCreatedCompleteMultipartUpload,
    /// Any object removal.
    #[serde(rename = "s3:ObjectRemoved:*")]
    ObjectRemoved,
}

impl S3EventType {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectCreated => "s3:ObjectCreated:*",
            Self::ObjectCreatedPut => "s3:ObjectCreated:Put",
            Self::ObjectCreatedPost => "s3:ObjectCreated:Post",
            Self::ObjectCreatedCopy => "s3:ObjectCreated:Copy",
            Self::ObjectCreatedCompleteMultipartUpload => {
                "s3:ObjectCreated:CompleteMultipartUpload"
            }
            Self::ObjectRemoved => "s3:ObjectRemoved:*",
        }
    }
}

impl std::fmt::Display for S3EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of a bucket event triggering a function.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct EventBindingSpec {
    /// Bucket whose events trigger the function.
    pub bucket: BucketRef,
    /// Function invoked.
    pub function: FunctionRef,
    /// Events subscribed to.
    #[builder(default = vec![S3EventType::ObjectCreated])]
    pub events: Vec<S3EventType>,
    /// Only keys starting with this prefix.
    #[builder(default, setter(strip_option, into))]
    pub prefix: Option<String>,
    /// Only keys ending with this suffix.
    #[builder(default, setter(strip_option, into))]
    pub suffix: Option<String>,
}

impl EventBindingSpec {
    pub(crate) fn validate(&self, id: &str) -> SynthResult<()> {
        let reject = |reason: &str| {
            Err(SynthError::InvalidEventFilter {
                binding: id.to_owned(),
                reason: reason.to_owned(),
            })
        };

        if self.events.is_empty() {
            return reject("at least one event type is required");
        }
        for value in [&self.prefix, &self.suffix].into_iter().flatten() {
            if value.is_empty() {
                return reject("key filter values must not be empty");
            }
            if value.len() > MAX_FILTER_LEN {
                return reject("key filter values must be at most 1024 characters");
            }
        }
        Ok(())
    }

    /// Logical ID of the invoke permission this binding renders.
    pub(crate) fn permission_id(id: &str) -> String {
        logical_id(&[id, PERMISSION])
    }

    fn filter(&self) -> Option<NotificationFilter> {
        let rules: Vec<FilterRule> = [("prefix", &self.prefix), ("suffix", &self.suffix)]
            .into_iter()
            .filter_map(|(name, value)| {
                value.as_ref().map(|v| FilterRule {
                    name: name.to_owned(),
                    value: v.clone(),
                })
            })
            .collect();
        (!rules.is_empty()).then_some(NotificationFilter {
            s3_key: S3KeyFilter { rules },
        })
    }

    /// Render the invoke permission and return the notifications the
    /// bucket must carry.
    pub(crate) fn render(
        &self,
        id: &str,
        ctx: &mut RenderContext<'_>,
    ) -> SynthResult<Vec<NotificationTarget>> {
        let props = PermissionProperties {
            action: "lambda:InvokeFunction".to_owned(),
            function_name: self.function.arn(),
            principal: S3_SERVICE_PRINCIPAL.to_owned(),
            source_account: Some(Expr::reference(PSEUDO_ACCOUNT_ID)),
            source_arn: Some(self.bucket.static_arn()),
        };
        let permission_id = ctx.put(&[id, PERMISSION], &props, ResourceOptions::default())?;

        let filter = self.filter();
        Ok(self
            .events
            .iter()
            .map(|event| NotificationTarget {
                configuration: LambdaConfiguration {
                    event: event.as_str().to_owned(),
                    function: self.function.arn(),
                    filter: filter.clone(),
                },
                permission_id: permission_id.clone(),
            })
            .collect())
    }
}

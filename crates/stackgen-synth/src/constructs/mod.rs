//! Constructs: typed specs for the resources a stack declares, and the
//! handles a stack returns for them.
//!
//! A spec is plain data. Adding it to a [`Stack`](crate::Stack) validates it
//! and returns a handle; handles are how constructs refer to each other
//! (a function names its role through a [`RoleRef`], a binding names its
//! bucket through a [`BucketRef`]). Specs are only turned into template
//! resources when the stack is synthesized.

pub mod bucket;
pub mod iam;
pub mod lambda;
pub mod notification;

use stackgen_model::Expr;

pub use bucket::{BucketSpec, EncryptionMode, RemovalPolicy};
pub use iam::{PolicySpec, RoleSpec};
pub use lambda::{FunctionSpec, LayerSpec};
pub use notification::{EventBindingSpec, S3EventType};

/// Anything that ends up as a resource with a logical ID.
pub trait LogicalResource {
    /// Logical ID of the construct's primary resource.
    fn logical_id(&self) -> &str;
}

macro_rules! impl_logical_resource {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl LogicalResource for $ty {
                fn logical_id(&self) -> &str {
                    &self.logical_id
                }
            }
        )+
    };
}

/// Handle to a bucket in a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRef {
    pub(crate) construct_id: String,
    pub(crate) logical_id: String,
    pub(crate) bucket_name: String,
}

impl BucketRef {
    /// Construct ID the bucket was added under.
    #[must_use]
    pub fn construct_id(&self) -> &str {
        &self.construct_id
    }

    /// The bucket name as declared.
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// The bucket name as resolved at deploy time (`Ref`).
    #[must_use]
    pub fn name(&self) -> Expr {
        Expr::reference(&self.logical_id)
    }

    /// The bucket ARN (`Fn::GetAtt`).
    #[must_use]
    pub fn arn(&self) -> Expr {
        Expr::get_att(&self.logical_id, "Arn")
    }

    /// ARN of objects matching `pattern`, e.g. `*`.
    #[must_use]
    pub fn arn_for_objects(&self, pattern: &str) -> Expr {
        Expr::Join(String::new(), vec![self.arn(), Expr::lit(format!("/{pattern}"))])
    }

    /// The bucket ARN built from the declared name, without referencing the
    /// bucket resource. Needed where a reference would close a dependency
    /// cycle, such as the invoke permission the bucket's notification
    /// configuration depends on.
    #[must_use]
    pub fn static_arn(&self) -> Expr {
        Expr::sub(format!("arn:${{AWS::Partition}}:s3:::{}", self.bucket_name))
    }
}

/// Handle to an IAM role in a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRef {
    pub(crate) logical_id: String,
}

impl RoleRef {
    /// The role ARN.
    #[must_use]
    pub fn arn(&self) -> Expr {
        Expr::get_att(&self.logical_id, "Arn")
    }

    /// The role name.
    #[must_use]
    pub fn name(&self) -> Expr {
        Expr::reference(&self.logical_id)
    }
}

/// Handle to a Lambda layer version in a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRef {
    pub(crate) logical_id: String,
}

impl LayerRef {
    /// The layer version ARN; `Ref` of a layer version returns it.
    #[must_use]
    pub fn arn(&self) -> Expr {
        Expr::reference(&self.logical_id)
    }
}

/// Handle to a Lambda function in a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRef {
    pub(crate) construct_id: String,
    pub(crate) logical_id: String,
}

impl FunctionRef {
    /// Construct ID the function was added under.
    #[must_use]
    pub fn construct_id(&self) -> &str {
        &self.construct_id
    }

    /// The function ARN.
    #[must_use]
    pub fn arn(&self) -> Expr {
        Expr::get_att(&self.logical_id, "Arn")
    }

    /// The function name.
    #[must_use]
    pub fn name(&self) -> Expr {
        Expr::reference(&self.logical_id)
    }
}

/// Handle to an inline IAM policy in a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRef {
    pub(crate) logical_id: String,
}

/// Handle to an event binding; its logical ID is the invoke permission's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBindingRef {
    pub(crate) logical_id: String,
}

impl_logical_resource!(BucketRef, RoleRef, LayerRef, FunctionRef, PolicyRef, EventBindingRef);

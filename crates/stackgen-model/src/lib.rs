//! CloudFormation template model for stackgen.
//!
//! Hand-written, typed property structs for the handful of resource types the
//! stackgen constructs emit, plus the pieces every template needs:
//!
//! - [`intrinsic`]: `Ref`, `Fn::GetAtt`, `Fn::Sub`, `Fn::Join` and reference
//!   discovery over rendered JSON.
//! - [`policy`]: IAM policy documents.
//! - [`resources`]: S3, IAM, Lambda, and CloudWatch Logs properties.
//! - [`template`]: the template document itself.
//!
//! Every property struct serializes to exactly the JSON CloudFormation expects;
//! optional fields are omitted rather than rendered as `null`.

pub mod intrinsic;
pub mod policy;
pub mod resources;
pub mod template;

pub use intrinsic::Expr;
pub use policy::{Effect, PolicyDocument, Principal, Statement};
pub use resources::{ResourceProperties, Tag};
pub use template::{DeletionPolicy, Template, TemplateOutput, TemplateResource};

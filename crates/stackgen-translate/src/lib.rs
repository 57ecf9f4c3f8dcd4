//! The S3 to Lambda translation pipeline, declared with stackgen.
//!
//! Two buckets, an execution role, a dependency layer, the translate function
//! with its environment, an `ObjectCreated` binding from the input bucket to
//! the function, an inline policy granting Translate, Comprehend, and S3
//! access, and two outputs naming the buckets.
//!
//! ```
//! use stackgen_core::DeploymentEnv;
//! use stackgen_synth::CodeLocation;
//! use stackgen_translate::{TranslationStackProps, build_translation_stack};
//!
//! let code = CodeLocation::S3 { bucket: "artifacts".into(), key: "fn.zip".into() };
//! let props = TranslationStackProps::builder()
//!     .function_code(code.clone())
//!     .layer_code(code)
//!     .target_language("de")
//!     .build();
//! let template = build_translation_stack(&DeploymentEnv::default(), &props)
//!     .unwrap()
//!     .synthesize()
//!     .unwrap();
//! assert!(template.outputs.contains_key("InputBucketName"));
//! ```

pub mod error;
pub mod language;
pub mod props;
pub mod stack;

pub use error::{TranslateStackError, TranslateStackResult};
pub use language::LanguagePair;
pub use props::TranslationStackProps;
pub use stack::{build_translation_stack, stack_name};

//! Template-shape tests for the synthesized translation pipeline.
//!
//! Every test builds the stack in memory and inspects the synthesized
//! template; nothing is deployed. Code locations point at S3 objects so no
//! asset directories are needed, except in the asset tests, which create
//! their own.
//!
//! ```text
//! cargo test -p stackgen-integration
//! ```

use std::sync::Once;

use serde_json::Value;
use stackgen_core::{DeploymentEnv, EnvironmentName};
use stackgen_synth::CodeLocation;
use stackgen_translate::{TranslationStackProps, build_translation_stack};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Props with pre-uploaded code and fixed bucket names.
#[must_use]
pub fn test_props() -> TranslationStackProps {
    let code = CodeLocation::S3 {
        bucket: "stackgen-test-artifacts".into(),
        key: "translate.zip".into(),
    };
    TranslationStackProps::builder()
        .input_bucket_name("it-translate-input")
        .output_bucket_name("it-translate-output")
        .function_code(code.clone())
        .layer_code(code)
        .build()
}

/// The `test` environment.
#[must_use]
pub fn test_env() -> DeploymentEnv {
    DeploymentEnv::new(EnvironmentName::new("test").expect("valid environment name"))
}

/// Synthesized template JSON text.
#[must_use]
pub fn synth_json(props: &TranslationStackProps) -> String {
    init_tracing();
    let stack = build_translation_stack(&test_env(), props).expect("build stack");
    stackgen_synth::to_template_json(&stack).expect("synthesize")
}

/// Synthesized template as a JSON value.
#[must_use]
pub fn synth_value(props: &TranslationStackProps) -> Value {
    serde_json::from_str(&synth_json(props)).expect("template is JSON")
}

/// `(logical ID, resource)` pairs of one type.
#[must_use]
pub fn resources_of_type<'a>(template: &'a Value, resource_type: &str) -> Vec<(&'a str, &'a Value)> {
    template["Resources"]
        .as_object()
        .expect("Resources is an object")
        .iter()
        .filter(|(_, r)| r["Type"] == resource_type)
        .map(|(id, r)| (id.as_str(), r))
        .collect()
}

/// The only resource of a type.
#[must_use]
pub fn single<'a>(template: &'a Value, resource_type: &str) -> (&'a str, &'a Value) {
    let found = resources_of_type(template, resource_type);
    assert_eq!(found.len(), 1, "expected exactly one {resource_type}");
    found[0]
}

/// Logical ID of the bucket with the given name.
#[must_use]
pub fn bucket_id<'a>(template: &'a Value, bucket_name: &str) -> &'a str {
    resources_of_type(template, "AWS::S3::Bucket")
        .into_iter()
        .find(|(_, r)| r["Properties"]["BucketName"] == bucket_name)
        .map(|(id, _)| id)
        .expect("bucket present")
}

mod test_assets;
mod test_binding;
mod test_buckets;
mod test_determinism;
mod test_function;
mod test_graph;
mod test_policy;
mod test_rejections;

//! The translation pipeline stack.
//!
//! An object created in the input bucket invokes the translate function,
//! which detects the source language (unless fixed), translates the object,
//! and writes the result to the output bucket.

use std::collections::BTreeMap;

use stackgen_core::DeploymentEnv;
use stackgen_model::{Expr, Statement};
use stackgen_synth::Stack;
use stackgen_synth::constructs::iam::LAMBDA_BASIC_EXECUTION;
use stackgen_synth::constructs::{
    BucketSpec, EventBindingSpec, FunctionSpec, LayerSpec, PolicySpec, RoleSpec,
};
use tracing::info;

use crate::error::TranslateStackResult;
use crate::language::LanguagePair;
use crate::props::TranslationStackProps;

/// Stack names are this prefix plus the PascalCase environment name.
pub const STACK_NAME_PREFIX: &str = "TranslationPipeline";

/// Construct IDs of the stack.
pub mod ids {
    /// Bucket objects to translate are uploaded to.
    pub const INPUT_BUCKET: &str = "InputBucket";
    /// Bucket translations are written to.
    pub const OUTPUT_BUCKET: &str = "OutputBucket";
    /// Execution role of the function.
    pub const ROLE: &str = "TranslateFunctionRole";
    /// Shared dependencies of the function.
    pub const LAYER: &str = "TranslateLayer";
    /// The translate function.
    pub const FUNCTION: &str = "TranslateFunction";
    /// Inline policy granting the function its service access.
    pub const POLICY: &str = "TranslateFunctionPolicy";
    /// Input bucket `ObjectCreated` events to the function.
    pub const BINDING: &str = "InputObjectCreated";
}

/// Function environment variable names.
pub mod env_keys {
    /// Environment identifier.
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Source language, `auto` to detect.
    pub const SOURCE_LANGUAGE: &str = "SOURCE_LANGUAGE";
    /// Target language.
    pub const TARGET_LANGUAGE: &str = "TARGET_LANGUAGE";
    /// Name of the output bucket.
    pub const DESTINATION_BUCKET: &str = "DESTINATION_BUCKET";
}

/// Output name of the output bucket's name.
pub const OUTPUT_BUCKET_NAME: &str = "OutputBucketName";

/// Output name of the input bucket's name.
pub const INPUT_BUCKET_NAME: &str = "InputBucketName";

/// Actions granted to the function. Translate and Comprehend have no
/// resource-level permissions, so the grant is on `*`.
pub const POLICY_ACTIONS: [&str; 4] = [
    "translate:TranslateText",
    "comprehend:DetectDominantLanguage",
    "s3:GetObject",
    "s3:PutObject",
];

/// Stack name for an environment, e.g. `TranslationPipelineProd`.
#[must_use]
pub fn stack_name(env: &DeploymentEnv) -> String {
    format!("{STACK_NAME_PREFIX}{}", env.name.to_pascal_case())
}

/// Build the translation pipeline stack for `env`.
///
/// # Errors
///
/// - Invalid language codes, or a fixed source language equal to the target.
/// - [`TranslateStackError::DerivedBucketName`](crate::TranslateStackError::DerivedBucketName)
///   if a bucket name is left to the environment and the result is invalid.
/// - Any [`SynthError`](stackgen_synth::SynthError) raised while adding
///   constructs: invalid bucket names, function limits, log retention, or an
///   unreadable code directory.
///
/// # Examples
///
/// ```
/// use stackgen_core::DeploymentEnv;
/// use stackgen_synth::CodeLocation;
/// use stackgen_translate::{TranslationStackProps, build_translation_stack};
///
/// let code = CodeLocation::S3 { bucket: "artifacts".into(), key: "fn.zip".into() };
/// let props = TranslationStackProps::builder()
///     .function_code(code.clone())
///     .layer_code(code)
///     .build();
/// let stack = build_translation_stack(&DeploymentEnv::default(), &props).unwrap();
/// assert_eq!(stack.name(), "TranslationPipelineDev");
/// ```
pub fn build_translation_stack(
    env: &DeploymentEnv,
    props: &TranslationStackProps,
) -> TranslateStackResult<Stack> {
    let languages = LanguagePair::parse(&props.source_language, &props.target_language)?;

    let input_bucket_name = props.input_bucket_name(env)?;
    let output_bucket_name = props.output_bucket_name(env)?;

    let mut stack = Stack::new(stack_name(env), env.clone())?.with_description(format!(
        "S3 to Lambda translation pipeline ({}, {})",
        env.name, env.region
    ));
    for (key, value) in &props.tags {
        stack.add_tag(key, value);
    }
    stack.add_tag("Environment", env.name.as_str());

    let input = stack.add_bucket(
        ids::INPUT_BUCKET,
        BucketSpec::builder()
            .bucket_name(input_bucket_name)
            .removal_policy(props.removal_policy)
            .build(),
    )?;
    let output = stack.add_bucket(
        ids::OUTPUT_BUCKET,
        BucketSpec::builder()
            .bucket_name(output_bucket_name)
            .removal_policy(props.removal_policy)
            .build(),
    )?;

    let role = stack.add_role(
        ids::ROLE,
        RoleSpec::builder()
            .managed_policies(vec![LAMBDA_BASIC_EXECUTION.to_owned()])
            .description("Execution role of the translate function")
            .build(),
    )?;

    let layer = stack.add_layer(
        ids::LAYER,
        LayerSpec::builder()
            .code(props.layer_code.clone())
            .compatible_runtimes(vec![props.runtime])
            .description("Dependencies of the translate function")
            .build(),
    )?;

    let policy = stack.add_policy(
        ids::POLICY,
        PolicySpec::builder()
            .statements(vec![
                Statement::allow(POLICY_ACTIONS, vec![Expr::lit("*")])
                    .with_sid("AllowTranslatePipeline"),
            ])
            .roles(vec![role.clone()])
            .build(),
    )?;

    let environment = BTreeMap::from([
        (env_keys::ENVIRONMENT.to_owned(), Expr::lit(env.name.as_str())),
        (
            env_keys::SOURCE_LANGUAGE.to_owned(),
            Expr::lit(languages.source.as_str()),
        ),
        (
            env_keys::TARGET_LANGUAGE.to_owned(),
            Expr::lit(languages.target.as_str()),
        ),
        (env_keys::DESTINATION_BUCKET.to_owned(), output.name()),
    ]);

    let mut function = FunctionSpec::builder()
        .runtime(props.runtime)
        .handler(props.handler.clone())
        .code(props.function_code.clone())
        .role(role)
        .timeout_seconds(props.timeout_seconds)
        .memory_size(props.memory_size)
        .layers(vec![layer])
        .environment(environment)
        .description("Translates objects from the input bucket into the output bucket")
        .build();
    function.log_retention_days = props.log_retention_days;
    let function = stack.add_function(ids::FUNCTION, function)?;
    // The role exists before its inline policy does; wait for the grant.
    stack.add_dependency(&function, &policy);

    let mut binding = EventBindingSpec::builder()
        .bucket(input.clone())
        .function(function)
        .build();
    binding.suffix.clone_from(&props.suffix_filter);
    stack.add_event_binding(ids::BINDING, binding)?;

    stack.add_output(
        OUTPUT_BUCKET_NAME,
        output.name(),
        Some("Bucket translations are written to"),
    )?;
    stack.add_output(
        INPUT_BUCKET_NAME,
        input.name(),
        Some("Bucket to upload objects for translation to"),
    )?;

    info!(
        stack = stack.name(),
        source = %languages.source,
        target = %languages.target,
        input_bucket = input.bucket_name(),
        output_bucket = output.bucket_name(),
        "translation stack built"
    );
    Ok(stack)
}

//! Invalid inputs are rejected before a template exists.

#[cfg(test)]
mod tests {
    use stackgen_core::DeploymentEnv;
    use stackgen_model::Expr;
    use stackgen_synth::constructs::{BucketSpec, RoleSpec};
    use stackgen_synth::{Stack, SynthError};
    use stackgen_translate::{TranslateStackError, build_translation_stack};

    use crate::{test_env, test_props};

    fn build_err(f: impl FnOnce(&mut stackgen_translate::TranslationStackProps)) -> TranslateStackError {
        let mut props = test_props();
        f(&mut props);
        build_translation_stack(&test_env(), &props).expect_err("should be rejected")
    }

    #[test]
    fn test_should_reject_invalid_bucket_names() {
        for name in ["UPPER-case", "ab", "bad..dots", "192.168.1.1", "xn--bucket", "bucket-s3alias"] {
            let err = build_err(|p| p.input_bucket_name = Some(name.into()));
            assert!(
                matches!(err, TranslateStackError::Synth(SynthError::InvalidBucketName { .. })),
                "expected rejection: {name}"
            );
        }
    }

    #[test]
    fn test_should_reject_function_limits() {
        assert!(matches!(
            build_err(|p| p.timeout_seconds = 0),
            TranslateStackError::Synth(SynthError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            build_err(|p| p.memory_size = 10_241),
            TranslateStackError::Synth(SynthError::InvalidMemorySize { .. })
        ));
        assert!(matches!(
            build_err(|p| p.log_retention_days = Some(2)),
            TranslateStackError::Synth(SynthError::InvalidRetention(2))
        ));
    }

    #[test]
    fn test_should_reject_language_codes() {
        assert!(matches!(
            build_err(|p| p.target_language = "auto".into()),
            TranslateStackError::InvalidTargetLanguage(_)
        ));
        assert!(matches!(
            build_err(|p| p.source_language = "english".into()),
            TranslateStackError::InvalidSourceLanguage(_)
        ));
        assert!(matches!(
            build_err(|p| p.source_language = "es".into()),
            TranslateStackError::SameLanguage(_)
        ));
    }

    #[test]
    fn test_should_reject_duplicate_ids_and_dangling_references() {
        let mut stack = Stack::new("Scratch", DeploymentEnv::default()).expect("stack");
        let bucket = stack
            .add_bucket("Data", BucketSpec::builder().bucket_name("scratch-data").build())
            .expect("bucket");
        assert!(matches!(
            stack.add_role("Data", RoleSpec::builder().build()),
            Err(SynthError::DuplicateConstructId(_))
        ));

        stack
            .add_output("Missing", Expr::reference("NoSuchResource"), None)
            .expect("output");
        stack.add_output("Data", bucket.name(), None).expect("output");
        assert!(matches!(
            stack.synthesize(),
            Err(SynthError::DanglingReference { ref target, .. }) if target == "NoSuchResource"
        ));
    }

    #[test]
    fn test_should_reject_dependency_cycle() {
        let mut stack = Stack::new("Scratch", DeploymentEnv::default()).expect("stack");
        let a = stack
            .add_bucket("A", BucketSpec::builder().bucket_name("scratch-a").build())
            .expect("bucket");
        let b = stack
            .add_bucket("B", BucketSpec::builder().bucket_name("scratch-b").build())
            .expect("bucket");
        stack.add_dependency(&a, &b);
        stack.add_dependency(&b, &a);
        match stack.synthesize() {
            Err(SynthError::DependencyCycle(cycle)) => {
                assert_eq!(cycle.first(), cycle.last());
                assert_eq!(cycle.len(), 3);
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }
}

//! Asset staging tests.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use serde_json::Value;
    use stackgen_synth::CodeLocation;
    use stackgen_translate::build_translation_stack;

    use crate::{single, test_env, test_props};

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    fn function_key(function_dir: &Path, layer_dir: &Path) -> String {
        let mut props = test_props();
        props.function_code = CodeLocation::Directory(function_dir.to_path_buf());
        props.layer_code = CodeLocation::Directory(layer_dir.to_path_buf());
        let stack = build_translation_stack(&test_env(), &props).expect("build");
        let template: Value =
            serde_json::from_str(&stackgen_synth::to_template_json(&stack).expect("synth"))
                .expect("json");
        let (_, function) = single(&template, "AWS::Lambda::Function");
        function["Properties"]["Code"]["S3Key"]
            .as_str()
            .expect("key")
            .to_owned()
    }

    #[test]
    fn test_should_key_code_by_content_hash() {
        let function = tempfile::tempdir().expect("tempdir");
        let layer = tempfile::tempdir().expect("tempdir");
        write(function.path(), "index.py", "def handler(event, context): pass\n");
        write(layer.path(), "python/lib.py", "X = 1\n");

        let first = function_key(function.path(), layer.path());
        assert_eq!(first, function_key(function.path(), layer.path()));
        assert!(first.ends_with(".zip"));

        write(function.path(), "index.py", "def handler(event, context): return 1\n");
        assert_ne!(first, function_key(function.path(), layer.path()));
    }

    #[test]
    fn test_should_write_manifest_listing_both_assets() {
        let function = tempfile::tempdir().expect("tempdir");
        let layer = tempfile::tempdir().expect("tempdir");
        let out = tempfile::tempdir().expect("tempdir");
        write(function.path(), "index.py", "pass\n");
        write(layer.path(), "python/lib.py", "pass # layer\n");

        let mut props = test_props();
        props.function_code = CodeLocation::Directory(function.path().to_path_buf());
        props.layer_code = CodeLocation::Directory(layer.path().to_path_buf());
        let stack = build_translation_stack(&test_env(), &props).expect("build");
        let written = stackgen_synth::write_to(&stack, out.path()).expect("write");

        assert!(written.template_path.ends_with("TranslationPipelineTest.template.json"));
        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(&written.assets_path).expect("read"))
                .expect("json");
        let files = manifest["files"].as_object().expect("files");
        assert_eq!(files.len(), 2);
        for (hash, asset) in files {
            assert_eq!(asset["objectKey"], format!("{hash}.zip"));
            assert_eq!(asset["packaging"], "zip");
            assert_eq!(
                asset["bucketName"],
                "stackgen-assets-${AWS::AccountId}-${AWS::Region}"
            );
        }
    }

    #[test]
    fn test_should_fail_on_missing_code_directory() {
        let mut props = test_props();
        props.function_code = CodeLocation::Directory("/nonexistent/stackgen/function".into());
        assert!(build_translation_stack(&test_env(), &props).is_err());
    }
}

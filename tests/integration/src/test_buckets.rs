//! Bucket shape tests.

#[cfg(test)]
mod tests {
    use crate::{bucket_id, resources_of_type, synth_value, test_props};

    #[test]
    fn test_should_declare_exactly_two_secure_buckets() {
        let template = synth_value(&test_props());
        let buckets = resources_of_type(&template, "AWS::S3::Bucket");
        assert_eq!(buckets.len(), 2);

        for (id, bucket) in buckets {
            let props = &bucket["Properties"];
            assert_eq!(props["VersioningConfiguration"]["Status"], "Enabled", "{id}");
            let rule = &props["BucketEncryption"]["ServerSideEncryptionConfiguration"][0];
            assert_eq!(rule["ServerSideEncryptionByDefault"]["SSEAlgorithm"], "AES256", "{id}");
            let block = &props["PublicAccessBlockConfiguration"];
            for setting in [
                "BlockPublicAcls",
                "BlockPublicPolicy",
                "IgnorePublicAcls",
                "RestrictPublicBuckets",
            ] {
                assert_eq!(block[setting], true, "{id} {setting}");
            }
            assert_eq!(bucket["DeletionPolicy"], "Retain", "{id}");
            assert_eq!(bucket["UpdateReplacePolicy"], "Retain", "{id}");
        }
    }

    #[test]
    fn test_should_enforce_tls_on_each_bucket() {
        let template = synth_value(&test_props());
        let policies = resources_of_type(&template, "AWS::S3::BucketPolicy");
        assert_eq!(policies.len(), 2);

        for name in ["it-translate-input", "it-translate-output"] {
            let id = bucket_id(&template, name);
            let (_, policy) = policies
                .iter()
                .find(|(_, p)| p["Properties"]["Bucket"]["Ref"] == id)
                .expect("policy for bucket");
            let statement = &policy["Properties"]["PolicyDocument"]["Statement"][0];
            assert_eq!(statement["Effect"], "Deny");
            assert_eq!(statement["Condition"]["Bool"]["aws:SecureTransport"], "false");
            assert_eq!(statement["Resource"][0]["Fn::GetAtt"][0], id);
        }
    }

    #[test]
    fn test_should_tag_buckets_with_environment() {
        let template = synth_value(&test_props());
        for (_, bucket) in resources_of_type(&template, "AWS::S3::Bucket") {
            let tags = bucket["Properties"]["Tags"].as_array().expect("tags");
            assert!(
                tags.iter()
                    .any(|t| t["Key"] == "Environment" && t["Value"] == "test")
            );
        }
    }

    #[test]
    fn test_should_expose_bucket_names_as_outputs() {
        let template = synth_value(&test_props());
        let outputs = template["Outputs"].as_object().expect("outputs");
        assert_eq!(outputs.len(), 2);
        assert_eq!(
            outputs["InputBucketName"]["Value"]["Ref"],
            bucket_id(&template, "it-translate-input")
        );
        assert_eq!(
            outputs["OutputBucketName"]["Value"]["Ref"],
            bucket_id(&template, "it-translate-output")
        );
    }
}

//! Inline policy tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{single, synth_value, test_props};

    #[test]
    fn test_should_grant_translate_pipeline_actions() {
        let template = synth_value(&test_props());
        let (_, policy) = single(&template, "AWS::IAM::Policy");
        let statements = policy["Properties"]["PolicyDocument"]["Statement"]
            .as_array()
            .expect("statements");

        let allowed: Vec<&str> = statements
            .iter()
            .filter(|s| s["Effect"] == "Allow")
            .flat_map(|s| s["Action"].as_array().into_iter().flatten())
            .filter_map(|a| a.as_str())
            .collect();
        for action in [
            "translate:TranslateText",
            "comprehend:DetectDominantLanguage",
            "s3:PutObject",
            "s3:GetObject",
        ] {
            assert!(allowed.contains(&action), "missing {action}");
        }
        assert_eq!(statements[0]["Resource"], json!(["*"]));
    }

    #[test]
    fn test_should_attach_policy_to_execution_role() {
        let template = synth_value(&test_props());
        let (role_id, _) = single(&template, "AWS::IAM::Role");
        let (policy_id, policy) = single(&template, "AWS::IAM::Policy");
        assert_eq!(policy["Properties"]["Roles"], json!([{"Ref": role_id}]));
        assert_eq!(policy["Properties"]["PolicyName"], policy_id);
    }
}

//! Event binding shape tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{bucket_id, resources_of_type, single, synth_value, test_props};

    #[test]
    fn test_should_bind_input_bucket_only() {
        let template = synth_value(&test_props());
        let input = bucket_id(&template, "it-translate-input");
        let output = bucket_id(&template, "it-translate-output");
        let (function_id, _) = single(&template, "AWS::Lambda::Function");

        let notifications = &template["Resources"][input]["Properties"]["NotificationConfiguration"];
        let configs = notifications["LambdaConfigurations"].as_array().expect("configs");
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0]["Event"], "s3:ObjectCreated:*");
        assert_eq!(configs[0]["Function"], json!({"Fn::GetAtt": [function_id, "Arn"]}));

        assert!(
            template["Resources"][output]["Properties"]
                .get("NotificationConfiguration")
                .is_none()
        );
    }

    #[test]
    fn test_should_scope_invoke_permission_to_input_bucket() {
        let template = synth_value(&test_props());
        let (_, permission) = single(&template, "AWS::Lambda::Permission");
        let props = &permission["Properties"];
        assert_eq!(props["Action"], "lambda:InvokeFunction");
        assert_eq!(props["Principal"], "s3.amazonaws.com");
        assert_eq!(props["SourceAccount"], json!({"Ref": "AWS::AccountId"}));
        assert_eq!(
            props["SourceArn"],
            json!({"Fn::Sub": "arn:${AWS::Partition}:s3:::it-translate-input"})
        );
    }

    #[test]
    fn test_should_apply_suffix_filter() {
        let mut props = test_props();
        props.suffix_filter = Some(".txt".into());
        let template = synth_value(&props);
        let input = bucket_id(&template, "it-translate-input");
        let config = &template["Resources"][input]["Properties"]["NotificationConfiguration"]
            ["LambdaConfigurations"][0];
        assert_eq!(
            config["Filter"]["S3Key"]["Rules"],
            json!([{"Name": "suffix", "Value": ".txt"}])
        );
        assert_eq!(resources_of_type(&template, "AWS::Lambda::Permission").len(), 1);
    }
}

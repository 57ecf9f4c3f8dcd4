//! Function shape tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{bucket_id, single, synth_value, test_props};

    #[test]
    fn test_should_set_exactly_the_four_environment_variables() {
        let template = synth_value(&test_props());
        let (_, function) = single(&template, "AWS::Lambda::Function");
        let variables = function["Properties"]["Environment"]["Variables"]
            .as_object()
            .expect("variables");

        let keys: Vec<_> = variables.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["DESTINATION_BUCKET", "ENVIRONMENT", "SOURCE_LANGUAGE", "TARGET_LANGUAGE"]
        );
        assert_eq!(variables["ENVIRONMENT"], "test");
        assert_eq!(variables["SOURCE_LANGUAGE"], "auto");
        assert_eq!(variables["TARGET_LANGUAGE"], "es");
        assert_eq!(
            variables["DESTINATION_BUCKET"],
            json!({"Ref": bucket_id(&template, "it-translate-output")})
        );
    }

    #[test]
    fn test_should_attach_role_and_layer() {
        let template = synth_value(&test_props());
        let (role_id, _) = single(&template, "AWS::IAM::Role");
        let (layer_id, _) = single(&template, "AWS::Lambda::LayerVersion");
        let (_, function) = single(&template, "AWS::Lambda::Function");
        let props = &function["Properties"];

        assert_eq!(props["Role"], json!({"Fn::GetAtt": [role_id, "Arn"]}));
        assert_eq!(props["Layers"], json!([{"Ref": layer_id}]));
        assert_eq!(props["Runtime"], "python3.12");
        assert_eq!(props["Handler"], "index.handler");
        assert_eq!(props["Timeout"], 60);
        assert_eq!(props["MemorySize"], 256);
    }

    #[test]
    fn test_should_send_logs_to_retained_log_group() {
        let template = synth_value(&test_props());
        let (log_group_id, log_group) = single(&template, "AWS::Logs::LogGroup");
        let (_, function) = single(&template, "AWS::Lambda::Function");
        assert_eq!(log_group["Properties"]["RetentionInDays"], 14);
        assert_eq!(
            function["Properties"]["LoggingConfig"]["LogGroup"],
            json!({"Ref": log_group_id})
        );
    }

    #[test]
    fn test_should_trust_lambda_and_attach_basic_execution() {
        let template = synth_value(&test_props());
        let (_, role) = single(&template, "AWS::IAM::Role");
        let trust = &role["Properties"]["AssumeRolePolicyDocument"]["Statement"][0];
        assert_eq!(trust["Principal"]["Service"], "lambda.amazonaws.com");
        assert_eq!(trust["Action"], json!(["sts:AssumeRole"]));
        assert_eq!(
            role["Properties"]["ManagedPolicyArns"][0]["Fn::Sub"],
            "arn:${AWS::Partition}:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole"
        );
    }
}

//! Dependency graph tests over the real stack.

#[cfg(test)]
mod tests {
    use stackgen_synth::DependencyGraph;
    use stackgen_translate::build_translation_stack;

    use crate::{test_env, test_props};

    #[test]
    fn test_should_order_role_and_layer_before_function() {
        let stack = build_translation_stack(&test_env(), &test_props()).expect("build");
        let template = stack.synthesize().expect("synthesize");
        let graph = DependencyGraph::from_template(&template).expect("graph");
        let order = graph.deployment_order().expect("order");
        let id_of = |resource_type: &str| {
            template
                .resources_of_type(resource_type)
                .next()
                .map(|(id, _)| id.clone())
                .expect("resource present")
        };
        let pos = |id: &str| order.iter().position(|x| x == id).expect("ordered");

        let function = id_of("AWS::Lambda::Function");
        let role = id_of("AWS::IAM::Role");
        let layer = id_of("AWS::Lambda::LayerVersion");
        let permission = id_of("AWS::Lambda::Permission");

        assert!(graph.depends_on(&function, &role));
        assert!(graph.depends_on(&function, &layer));
        assert!(pos(&role) < pos(&function));
        assert!(pos(&layer) < pos(&function));
        assert!(pos(&function) < pos(&permission));
        assert_eq!(order.len(), template.resources.len());
    }

    #[test]
    fn test_should_make_input_bucket_depend_on_permission() {
        let stack = build_translation_stack(&test_env(), &test_props()).expect("build");
        let template = stack.synthesize().expect("synthesize");
        let graph = DependencyGraph::from_template(&template).expect("graph");
        let (permission, _) = template
            .resources_of_type("AWS::Lambda::Permission")
            .next()
            .expect("permission");
        let (input, _) = template
            .resources_of_type("AWS::S3::Bucket")
            .find(|(_, r)| r.properties["BucketName"] == "it-translate-input")
            .expect("input bucket");
        let (output, _) = template
            .resources_of_type("AWS::S3::Bucket")
            .find(|(_, r)| r.properties["BucketName"] == "it-translate-output")
            .expect("output bucket");

        assert!(graph.depends_on(input, permission));
        assert!(!graph.depends_on(permission, input));
        assert!(!graph.depends_on(output, permission));
    }

    #[test]
    fn test_should_list_resources_in_stable_order() {
        let a = build_translation_stack(&test_env(), &test_props())
            .expect("build")
            .deployment_order()
            .expect("order");
        let b = build_translation_stack(&test_env(), &test_props())
            .expect("build")
            .deployment_order()
            .expect("order");
        assert_eq!(a, b);
    }
}

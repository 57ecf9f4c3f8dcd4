//! Synthesis determinism tests.

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::{single, synth_json, synth_value, test_props};

    /// Paths of every leaf that differs between two JSON documents.
    fn diff(a: &Value, b: &Value, path: &str, out: &mut Vec<String>) {
        match (a, b) {
            (Value::Object(x), Value::Object(y)) => {
                for key in x.keys().chain(y.keys().filter(|k| !x.contains_key(*k))) {
                    let next = format!("{path}/{key}");
                    match (x.get(key), y.get(key)) {
                        (Some(l), Some(r)) => diff(l, r, &next, out),
                        _ => out.push(next),
                    }
                }
            }
            (Value::Array(x), Value::Array(y)) if x.len() == y.len() => {
                for (i, (l, r)) in x.iter().zip(y).enumerate() {
                    diff(l, r, &format!("{path}/{i}"), out);
                }
            }
            _ if a != b => out.push(path.to_owned()),
            _ => {}
        }
    }

    #[test]
    fn test_should_synthesize_byte_identical_output() {
        let first = synth_json(&test_props());
        let second = synth_json(&test_props());
        assert_eq!(first, second);
        assert!(first.ends_with('\n'));
    }

    #[test]
    fn test_should_change_only_target_language_field() {
        let before = synth_value(&test_props());
        let mut props = test_props();
        props.target_language = "fr".into();
        let after = synth_value(&props);

        let (function_id, _) = single(&before, "AWS::Lambda::Function");
        let mut changed = Vec::new();
        diff(&before, &after, "", &mut changed);
        assert_eq!(
            changed,
            vec![format!(
                "/Resources/{function_id}/Properties/Environment/Variables/TARGET_LANGUAGE"
            )]
        );
        assert_eq!(
            after["Resources"][function_id]["Properties"]["Environment"]["Variables"]["TARGET_LANGUAGE"],
            "fr"
        );
    }

    #[test]
    fn test_should_record_construct_paths_in_metadata() {
        let template = synth_value(&test_props());
        let (_, function) = single(&template, "AWS::Lambda::Function");
        assert_eq!(
            function["Metadata"]["stackgen:path"],
            "TranslationPipelineTest/TranslateFunction/Resource"
        );
    }
}

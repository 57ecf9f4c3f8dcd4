//! Resource dependency graph.
//!
//! Edges come from two places, the same two CloudFormation itself uses:
//! intrinsic references inside a resource's properties and its explicit
//! `DependsOn` list. The graph is built from a rendered [`Template`], so it
//! sees exactly what the deployment tool will see.

use std::collections::{BTreeMap, BTreeSet};

use stackgen_model::Template;
use stackgen_model::intrinsic::collect_references;

use crate::error::{SynthError, SynthResult};

/// Dependencies between the resources of one template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    /// Logical ID -> logical IDs it depends on.
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Build the graph of a template.
    ///
    /// # Errors
    /// [`SynthError::DanglingReference`] if a resource or output refers to a
    /// logical ID that is not in the template.
    pub fn from_template(template: &Template) -> SynthResult<Self> {
        let mut edges = BTreeMap::new();

        for (id, resource) in &template.resources {
            let mut deps = collect_references(&resource.properties);
            deps.extend(resource.depends_on.iter().cloned());
            for dep in &deps {
                if !template.resources.contains_key(dep) {
                    return Err(SynthError::DanglingReference {
                        from: id.clone(),
                        target: dep.clone(),
                    });
                }
            }
            edges.insert(id.clone(), deps);
        }

        for (name, output) in &template.outputs {
            let value = serde_json::to_value(output)?;
            if let Some(target) = collect_references(&value)
                .into_iter()
                .find(|t| !template.resources.contains_key(t))
            {
                return Err(SynthError::DanglingReference {
                    from: name.clone(),
                    target,
                });
            }
        }

        Ok(Self { edges })
    }

    /// Direct dependencies of a resource.
    pub fn dependencies_of(&self, logical_id: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(logical_id)
            .into_iter()
            .flat_map(|deps| deps.iter().map(String::as_str))
    }

    /// Whether `from` depends on `to`, directly or transitively.
    #[must_use]
    pub fn depends_on(&self, from: &str, to: &str) -> bool {
        let mut stack = vec![from];
        let mut seen = BTreeSet::new();
        while let Some(node) = stack.pop() {
            for dep in self.dependencies_of(node) {
                if dep == to {
                    return true;
                }
                if seen.insert(dep) {
                    stack.push(dep);
                }
            }
        }
        false
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// A topological order: every resource comes after everything it depends
    /// on. Ties are broken by logical ID, so the order is deterministic.
    ///
    /// # Errors
    /// [`SynthError::DependencyCycle`] naming the resources on one cycle.
    pub fn deployment_order(&self) -> SynthResult<Vec<String>> {
        let mut remaining: BTreeMap<&str, usize> = self
            .edges
            .iter()
            .map(|(id, deps)| (id.as_str(), deps.len()))
            .collect();
        let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (id, deps) in &self.edges {
            for dep in deps {
                dependents.entry(dep.as_str()).or_default().push(id.as_str());
            }
        }

        let mut ready: BTreeSet<&str> = remaining
            .iter()
            .filter(|(_, n)| **n == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut order = Vec::with_capacity(self.edges.len());

        while let Some(id) = ready.pop_first() {
            remaining.remove(id);
            order.push(id.to_owned());
            for dependent in dependents.get(id).into_iter().flatten() {
                if let Some(n) = remaining.get_mut(dependent) {
                    *n -= 1;
                    if *n == 0 {
                        ready.insert(*dependent);
                    }
                }
            }
        }

        if remaining.is_empty() {
            Ok(order)
        } else {
            let stuck: BTreeSet<&str> = remaining.keys().copied().collect();
            Err(SynthError::DependencyCycle(self.find_cycle(&stuck)))
        }
    }

    /// Walk dependency edges among `stuck` nodes until one repeats. Every
    /// stuck node has at least one stuck dependency, so the walk must loop.
    fn find_cycle(&self, stuck: &BTreeSet<&str>) -> Vec<String> {
        let Some(&start) = stuck.first() else {
            return Vec::new();
        };

        let mut path: Vec<&str> = vec![start];
        let mut position: BTreeMap<&str, usize> = BTreeMap::from([(start, 0)]);
        let mut current = start;

        loop {
            let Some(next) = self.dependencies_of(current).find(|d| stuck.contains(d)) else {
                return path.iter().map(|s| (*s).to_owned()).collect();
            };
            if let Some(&at) = position.get(next) {
                let mut cycle: Vec<String> = path[at..].iter().map(|s| (*s).to_owned()).collect();
                cycle.push(next.to_owned());
                return cycle;
            }
            position.insert(next, path.len());
            path.push(next);
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;
    use stackgen_model::{Expr, TemplateOutput, TemplateResource};

    use super::*;

    fn resource(properties: serde_json::Value, depends_on: &[&str]) -> TemplateResource {
        TemplateResource {
            resource_type: "AWS::Test::Thing".into(),
            properties,
            depends_on: depends_on.iter().map(|s| (*s).to_owned()).collect(),
            deletion_policy: None,
            update_replace_policy: None,
            metadata: BTreeMap::new(),
        }
    }

    fn template(resources: Vec<(&str, TemplateResource)>) -> Template {
        Template {
            resources: resources
                .into_iter()
                .map(|(id, r)| (id.to_owned(), r))
                .collect(),
            ..Template::default()
        }
    }

    #[test]
    fn test_should_order_dependencies_first() {
        let t = template(vec![
            ("Function", resource(json!({"Role": {"Fn::GetAtt": ["Role", "Arn"]}, "Layers": [{"Ref": "Layer"}]}), &[])),
            ("Role", resource(json!({}), &[])),
            ("Layer", resource(json!({}), &[])),
            ("Bucket", resource(json!({}), &["Function"])),
        ]);
        let order = DependencyGraph::from_template(&t).unwrap().deployment_order().unwrap();
        assert_eq!(order, vec!["Layer", "Role", "Function", "Bucket"]);
    }

    #[test]
    fn test_should_report_transitive_dependencies() {
        let t = template(vec![
            ("A", resource(json!({"X": {"Ref": "B"}}), &[])),
            ("B", resource(json!({}), &["C"])),
            ("C", resource(json!({}), &[])),
        ]);
        let graph = DependencyGraph::from_template(&t).unwrap();
        assert!(graph.depends_on("A", "C"));
        assert!(!graph.depends_on("C", "A"));
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_should_reject_dangling_reference() {
        let t = template(vec![("A", resource(json!({"X": {"Ref": "Missing"}}), &[]))]);
        let err = DependencyGraph::from_template(&t).unwrap_err();
        assert!(matches!(
            err,
            SynthError::DanglingReference { ref from, ref target } if from == "A" && target == "Missing"
        ));
    }

    #[test]
    fn test_should_reject_dangling_output_reference() {
        let mut t = template(vec![("A", resource(json!({}), &[]))]);
        t.outputs.insert(
            "Out".into(),
            TemplateOutput {
                description: None,
                value: Expr::reference("Gone"),
                export: None,
            },
        );
        assert!(matches!(
            DependencyGraph::from_template(&t),
            Err(SynthError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_should_ignore_pseudo_parameters() {
        let t = template(vec![(
            "A",
            resource(json!({"Account": {"Ref": "AWS::AccountId"}}), &[]),
        )]);
        let graph = DependencyGraph::from_template(&t).unwrap();
        assert_eq!(graph.dependencies_of("A").count(), 0);
    }

    #[test]
    fn test_should_detect_cycle() {
        let t = template(vec![
            ("A", resource(json!({"X": {"Ref": "B"}}), &[])),
            ("B", resource(json!({}), &["C"])),
            ("C", resource(json!({"Y": {"Fn::GetAtt": ["A", "Arn"]}}), &[])),
            ("D", resource(json!({}), &[])),
        ]);
        let err = DependencyGraph::from_template(&t)
            .unwrap()
            .deployment_order()
            .unwrap_err();
        match err {
            SynthError::DependencyCycle(cycle) => {
                assert_eq!(cycle, vec!["A", "B", "C", "A"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

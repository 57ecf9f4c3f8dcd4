//! Rendering constructs into template resources.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use stackgen_model::{DeletionPolicy, ResourceProperties, Tag, Template, TemplateResource};
use tracing::debug;

use crate::error::SynthResult;
use crate::logical_id::logical_id;

/// Metadata key holding a resource's construct path.
pub const PATH_METADATA_KEY: &str = "stackgen:path";

/// Per-resource options beyond its properties.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResourceOptions {
    pub depends_on: BTreeSet<String>,
    pub deletion_policy: Option<DeletionPolicy>,
}

impl ResourceOptions {
    pub fn retained(policy: DeletionPolicy) -> Self {
        Self {
            depends_on: BTreeSet::new(),
            deletion_policy: Some(policy),
        }
    }
}

/// Accumulates rendered resources for one synthesis run.
#[derive(Debug)]
pub(crate) struct RenderContext<'a> {
    stack_name: &'a str,
    tags: Vec<Tag>,
    extra_deps: &'a BTreeMap<String, BTreeSet<String>>,
    template: Template,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        stack_name: &'a str,
        description: Option<String>,
        tags: &BTreeMap<String, String>,
        extra_deps: &'a BTreeMap<String, BTreeSet<String>>,
    ) -> Self {
        Self {
            stack_name,
            tags: tags.iter().map(|(k, v)| Tag::new(k, v)).collect(),
            extra_deps,
            template: Template {
                description,
                ..Template::default()
            },
        }
    }

    /// Stack-wide tags, sorted by key.
    pub fn tags(&self) -> Vec<Tag> {
        self.tags.clone()
    }

    /// Render `props` as the resource at construct `path`; returns its logical ID.
    pub fn put<P: ResourceProperties>(
        &mut self,
        path: &[&str],
        props: &P,
        options: ResourceOptions,
    ) -> SynthResult<String> {
        let id = logical_id(path);
        let properties = serde_json::to_value(props)?;

        let mut depends_on = options.depends_on;
        if let Some(extra) = self.extra_deps.get(&id) {
            depends_on.extend(extra.iter().cloned());
        }

        let metadata = BTreeMap::from([(
            PATH_METADATA_KEY.to_owned(),
            Value::String(format!("{}/{}", self.stack_name, path.join("/"))),
        )]);

        debug!(
            logical_id = %id,
            resource_type = P::RESOURCE_TYPE,
            depends_on = depends_on.len(),
            "rendered resource"
        );

        self.template.resources.insert(
            id.clone(),
            TemplateResource {
                resource_type: P::RESOURCE_TYPE.to_owned(),
                properties,
                depends_on: depends_on.into_iter().collect(),
                deletion_policy: options.deletion_policy,
                update_replace_policy: options.deletion_policy,
                metadata,
            },
        );

        Ok(id)
    }

    pub fn finish(self) -> Template {
        self.template
    }
}

//! The stack: a named, validated collection of constructs.
//!
//! [`Stack`] accepts construct specs one at a time, validating each as it is
//! added and returning a typed handle other constructs can refer to. Nothing
//! is rendered until [`Stack::synthesize`], which is pure: the same stack
//! always produces the same template.

use std::collections::{BTreeMap, BTreeSet};

use stackgen_core::DeploymentEnv;
use stackgen_model::resources::lambda::S3Code;
use stackgen_model::template::OutputExport;
use stackgen_model::{Expr, Template, TemplateOutput};
use tracing::{debug, info};

use crate::asset::{Asset, CodeLocation};
use crate::constructs::bucket::NotificationTarget;
use crate::constructs::{
    BucketRef, BucketSpec, EventBindingRef, EventBindingSpec, FunctionRef, FunctionSpec, LayerRef,
    LayerSpec, LogicalResource, PolicyRef, PolicySpec, RoleRef, RoleSpec,
};
use crate::error::{SynthError, SynthResult};
use crate::graph::DependencyGraph;
use crate::logical_id::{PRIMARY, logical_id};
use crate::render::RenderContext;
use crate::validation::{validate_bucket_name, validate_construct_id, validate_stack_name};

/// A construct as stored in the stack, with its code already resolved.
#[derive(Debug, Clone)]
enum Node {
    Bucket(BucketSpec),
    Role(RoleSpec),
    Layer(LayerSpec, S3Code),
    Function(FunctionSpec, S3Code),
    Policy(PolicySpec),
    EventBinding(EventBindingSpec),
}

/// A stack under construction.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    description: Option<String>,
    env: DeploymentEnv,
    tags: BTreeMap<String, String>,
    /// Constructs in insertion order.
    nodes: Vec<(String, Node)>,
    /// Construct IDs in use.
    ids: BTreeSet<String>,
    bucket_names: BTreeSet<String>,
    outputs: BTreeMap<String, TemplateOutput>,
    /// Staged assets by hash.
    assets: BTreeMap<String, Asset>,
    /// Explicit dependencies: logical ID -> logical IDs it must follow.
    dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl Stack {
    /// Create an empty stack.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidStackName`] if `name` is not a valid
    /// CloudFormation stack name.
    pub fn new(name: impl Into<String>, env: DeploymentEnv) -> SynthResult<Self> {
        let name = name.into();
        validate_stack_name(&name)?;
        Ok(Self {
            name,
            description: None,
            env,
            tags: BTreeMap::new(),
            nodes: Vec::new(),
            ids: BTreeSet::new(),
            bucket_names: BTreeSet::new(),
            outputs: BTreeMap::new(),
            assets: BTreeMap::new(),
            dependencies: BTreeMap::new(),
        })
    }

    /// Set the template description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Tag every taggable resource in the stack. A later value for the same
    /// key replaces the earlier one.
    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Stack name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target environment.
    #[must_use]
    pub fn env(&self) -> &DeploymentEnv {
        &self.env
    }

    /// Stack-wide tags.
    #[must_use]
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Staged assets, ordered by hash.
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    /// Construct IDs in the order they were added.
    pub fn construct_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|(id, _)| id.as_str())
    }

    /// Add an S3 bucket.
    ///
    /// # Errors
    ///
    /// - [`SynthError::InvalidConstructId`] / [`SynthError::DuplicateConstructId`]
    ///   for a bad or reused `id`.
    /// - [`SynthError::InvalidBucketName`] if the name breaks the S3 rules.
    /// - [`SynthError::DuplicateBucketName`] if another bucket in this stack
    ///   already has the name.
    pub fn add_bucket(&mut self, id: &str, spec: BucketSpec) -> SynthResult<BucketRef> {
        self.check_id(id)?;
        validate_bucket_name(&spec.bucket_name)?;
        if self.bucket_names.contains(&spec.bucket_name) {
            return Err(SynthError::DuplicateBucketName(spec.bucket_name));
        }

        self.bucket_names.insert(spec.bucket_name.clone());
        let handle = spec.handle(id, primary_id(id));
        self.insert(id, Node::Bucket(spec));
        Ok(handle)
    }

    /// Add an IAM role.
    ///
    /// # Errors
    ///
    /// Fails for a bad or reused `id`.
    pub fn add_role(&mut self, id: &str, spec: RoleSpec) -> SynthResult<RoleRef> {
        self.check_id(id)?;
        self.insert(id, Node::Role(spec));
        Ok(RoleRef {
            logical_id: primary_id(id),
        })
    }

    /// Add a Lambda layer version. A directory code location is hashed and
    /// staged as an asset.
    ///
    /// # Errors
    ///
    /// Fails for a bad or reused `id`, or with [`SynthError::Asset`] if the
    /// code directory cannot be read.
    pub fn add_layer(&mut self, id: &str, spec: LayerSpec) -> SynthResult<LayerRef> {
        self.check_id(id)?;
        let code = self.stage(&spec.code)?;
        self.insert(id, Node::Layer(spec, code));
        Ok(LayerRef {
            logical_id: primary_id(id),
        })
    }

    /// Add a Lambda function.
    ///
    /// # Errors
    ///
    /// - Fails for a bad or reused `id`.
    /// - [`SynthError::InvalidTimeout`], [`SynthError::InvalidMemorySize`],
    ///   [`SynthError::InvalidHandler`], or [`SynthError::InvalidRetention`]
    ///   if the function breaks a Lambda limit.
    /// - [`SynthError::DanglingReference`] if its role or a layer is not in
    ///   this stack.
    /// - [`SynthError::Asset`] if the code directory cannot be read.
    pub fn add_function(&mut self, id: &str, spec: FunctionSpec) -> SynthResult<FunctionRef> {
        self.check_id(id)?;
        spec.validate(id)?;
        self.check_owned(id, &spec.role, |node| matches!(node, Node::Role(_)))?;
        for layer in &spec.layers {
            self.check_owned(id, layer, |node| matches!(node, Node::Layer(..)))?;
        }

        let code = self.stage(&spec.code)?;
        self.insert(id, Node::Function(spec, code));
        Ok(FunctionRef {
            construct_id: id.to_owned(),
            logical_id: primary_id(id),
        })
    }

    /// Bind bucket events to a function.
    ///
    /// # Errors
    ///
    /// - Fails for a bad or reused `id`.
    /// - [`SynthError::InvalidEventFilter`] for an empty event list or a bad
    ///   key filter.
    /// - [`SynthError::DanglingReference`] if the bucket or function is not in
    ///   this stack.
    pub fn add_event_binding(
        &mut self,
        id: &str,
        spec: EventBindingSpec,
    ) -> SynthResult<EventBindingRef> {
        self.check_id(id)?;
        spec.validate(id)?;
        self.check_owned(id, &spec.bucket, |node| {
            matches!(node, Node::Bucket(b) if b.bucket_name == spec.bucket.bucket_name())
        })?;
        self.check_owned(id, &spec.function, |node| matches!(node, Node::Function(..)))?;

        self.insert(id, Node::EventBinding(spec));
        Ok(EventBindingRef {
            logical_id: EventBindingSpec::permission_id(id),
        })
    }

    /// Add an inline IAM policy.
    ///
    /// # Errors
    ///
    /// Fails for a bad or reused `id`, or with
    /// [`SynthError::DanglingReference`] if a role is not in this stack.
    pub fn add_policy(&mut self, id: &str, spec: PolicySpec) -> SynthResult<PolicyRef> {
        self.check_id(id)?;
        for role in &spec.roles {
            self.check_owned(id, role, |node| matches!(node, Node::Role(_)))?;
        }
        self.insert(id, Node::Policy(spec));
        Ok(PolicyRef {
            logical_id: primary_id(id),
        })
    }

    /// Make `dependent` wait for `dependency`, beyond what references imply.
    /// Cycles are reported by [`Stack::synthesize`].
    pub fn add_dependency(
        &mut self,
        dependent: &impl LogicalResource,
        dependency: &impl LogicalResource,
    ) {
        debug!(
            dependent = dependent.logical_id(),
            dependency = dependency.logical_id(),
            "explicit dependency added"
        );
        self.dependencies
            .entry(dependent.logical_id().to_owned())
            .or_default()
            .insert(dependency.logical_id().to_owned());
    }

    /// Add a stack output.
    ///
    /// # Errors
    ///
    /// [`SynthError::InvalidConstructId`] if `name` is not alphanumeric, or
    /// [`SynthError::DuplicateConstructId`] if the output already exists.
    pub fn add_output(
        &mut self,
        name: &str,
        value: Expr,
        description: Option<&str>,
    ) -> SynthResult<()> {
        validate_construct_id(name)?;
        if self.outputs.contains_key(name) {
            return Err(SynthError::DuplicateConstructId(name.to_owned()));
        }
        self.outputs.insert(
            name.to_owned(),
            TemplateOutput {
                description: description.map(str::to_owned),
                value,
                export: None,
            },
        );
        Ok(())
    }

    /// Export an existing output under `${AWS::StackName}-<name>` so other
    /// stacks can import it.
    ///
    /// # Errors
    ///
    /// [`SynthError::DanglingReference`] if there is no such output.
    pub fn export_output(&mut self, name: &str) -> SynthResult<()> {
        let output = self
            .outputs
            .get_mut(name)
            .ok_or_else(|| SynthError::DanglingReference {
                from: "Exports".to_owned(),
                target: name.to_owned(),
            })?;
        output.export = Some(OutputExport {
            name: Expr::sub(format!("${{AWS::StackName}}-{name}")),
        });
        Ok(())
    }

    /// Render the stack into a template.
    ///
    /// # Errors
    ///
    /// - [`SynthError::DanglingReference`] if anything refers to a resource
    ///   that is not in the template.
    /// - [`SynthError::DependencyCycle`] if explicit dependencies close a loop.
    pub fn synthesize(&self) -> SynthResult<Template> {
        let mut ctx = RenderContext::new(
            &self.name,
            self.description.clone(),
            &self.tags,
            &self.dependencies,
        );

        // Bindings first: buckets need their notifications and permissions.
        let mut notifications: BTreeMap<&str, Vec<NotificationTarget>> = BTreeMap::new();
        for (id, node) in &self.nodes {
            if let Node::EventBinding(spec) = node {
                let targets = spec.render(id, &mut ctx)?;
                notifications
                    .entry(spec.bucket.construct_id())
                    .or_default()
                    .extend(targets);
            }
        }

        for (id, node) in &self.nodes {
            match node {
                Node::Bucket(spec) => {
                    let targets = notifications.get(id.as_str()).map_or(&[][..], Vec::as_slice);
                    spec.render(id, targets, &mut ctx)?;
                }
                Node::Role(spec) => spec.render(id, &mut ctx)?,
                Node::Layer(spec, code) => spec.render(id, code, &mut ctx)?,
                Node::Function(spec, code) => spec.render(id, code, &mut ctx)?,
                Node::Policy(spec) => spec.render(id, &mut ctx)?,
                Node::EventBinding(_) => {}
            }
        }

        let mut template = ctx.finish();
        template.outputs = self.outputs.clone();

        let order = DependencyGraph::from_template(&template)?.deployment_order()?;
        info!(
            stack = %self.name,
            environment = %self.env.name,
            resources = order.len(),
            outputs = template.outputs.len(),
            assets = self.assets.len(),
            "stack synthesized"
        );
        Ok(template)
    }

    /// Logical IDs in an order the deployment tool could create them.
    ///
    /// # Errors
    ///
    /// Same as [`Stack::synthesize`].
    pub fn deployment_order(&self) -> SynthResult<Vec<String>> {
        let template = self.synthesize()?;
        DependencyGraph::from_template(&template)?.deployment_order()
    }

    fn check_id(&self, id: &str) -> SynthResult<()> {
        validate_construct_id(id)?;
        if self.ids.contains(id) {
            return Err(SynthError::DuplicateConstructId(id.to_owned()));
        }
        Ok(())
    }

    /// A handle is only usable in the stack that issued it. Logical IDs
    /// repeat across stacks, so the construct stored under the handle's
    /// logical ID must also be the one the handle describes.
    fn check_owned(
        &self,
        from: &str,
        target: &impl LogicalResource,
        describes: impl Fn(&Node) -> bool,
    ) -> SynthResult<()> {
        let owned = self
            .nodes
            .iter()
            .any(|(id, node)| primary_id(id) == target.logical_id() && describes(node));
        if owned {
            Ok(())
        } else {
            Err(SynthError::DanglingReference {
                from: from.to_owned(),
                target: target.logical_id().to_owned(),
            })
        }
    }

    fn stage(&mut self, code: &CodeLocation) -> SynthResult<S3Code> {
        match code {
            CodeLocation::S3 { bucket, key } => Ok(S3Code {
                s3_bucket: Expr::lit(bucket),
                s3_key: Expr::lit(key),
            }),
            CodeLocation::Directory(path) => {
                let asset = Asset::from_directory(path)?;
                let code = asset.code();
                debug!(path = %path.display(), hash = %asset.hash, "asset staged");
                self.assets.insert(asset.hash.clone(), asset);
                Ok(code)
            }
        }
    }

    fn insert(&mut self, id: &str, node: Node) {
        debug!(stack = %self.name, construct = id, "construct added");
        self.ids.insert(id.to_owned());
        self.nodes.push((id.to_owned(), node));
    }
}

fn primary_id(id: &str) -> String {
    logical_id(&[id, PRIMARY])
}

//! Construct layer for stackgen.
//!
//! A [`Stack`] collects construct specs (buckets, roles, layers, functions,
//! event bindings, inline policies), validates them as they are added, and
//! synthesizes them into a CloudFormation [`Template`](stackgen_model::Template).
//!
//! # Modules
//!
//! - [`constructs`]: construct specs and the handles a stack returns.
//! - [`stack`]: the stack itself.
//! - [`logical_id`]: logical ID allocation from construct paths.
//! - [`graph`]: the resource dependency graph and deployment order.
//! - [`asset`]: directory hashing and the asset manifest.
//! - [`validation`]: name and limit checks.
//! - [`synth`]: writing templates and manifests to disk.

pub mod asset;
pub mod constructs;
pub mod error;
pub mod graph;
pub mod logical_id;
mod render;
pub mod stack;
pub mod synth;
pub mod validation;

pub use asset::{Asset, AssetManifest, CodeLocation};
pub use error::{SynthError, SynthResult};
pub use graph::DependencyGraph;
pub use render::PATH_METADATA_KEY;
pub use stack::Stack;
pub use synth::{SynthOutput, to_asset_manifest_json, to_template_json, write_to};

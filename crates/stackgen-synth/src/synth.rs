//! Writing synthesized stacks to disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::asset::AssetManifest;
use crate::error::SynthResult;
use crate::stack::Stack;

/// Files written for one stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthOutput {
    /// `<StackName>.template.json`.
    pub template_path: PathBuf,
    /// `<StackName>.assets.json`.
    pub assets_path: PathBuf,
}

/// Render a stack's template as pretty JSON with a trailing newline.
///
/// # Errors
///
/// Any error of [`Stack::synthesize`].
pub fn to_template_json(stack: &Stack) -> SynthResult<String> {
    Ok(stack.synthesize()?.to_json_pretty()?)
}

/// Render a stack's asset manifest as pretty JSON with a trailing newline.
///
/// # Errors
///
/// Fails only if the manifest cannot be represented as JSON.
pub fn to_asset_manifest_json(stack: &Stack) -> SynthResult<String> {
    let manifest = AssetManifest::new(stack.assets());
    let mut out = serde_json::to_string_pretty(&manifest)?;
    out.push('\n');
    Ok(out)
}

/// Synthesize `stack` and write its template and asset manifest into
/// `outdir`, creating the directory if needed.
///
/// # Errors
///
/// Any synthesis error, or [`SynthError::Io`](crate::SynthError::Io) if the
/// files cannot be written.
pub fn write_to(stack: &Stack, outdir: &Path) -> SynthResult<SynthOutput> {
    let template = to_template_json(stack)?;
    let manifest = to_asset_manifest_json(stack)?;

    fs::create_dir_all(outdir)?;
    let output = SynthOutput {
        template_path: outdir.join(format!("{}.template.json", stack.name())),
        assets_path: outdir.join(format!("{}.assets.json", stack.name())),
    };
    fs::write(&output.template_path, template)?;
    fs::write(&output.assets_path, manifest)?;

    info!(
        stack = stack.name(),
        template = %output.template_path.display(),
        "template written"
    );
    Ok(output)
}

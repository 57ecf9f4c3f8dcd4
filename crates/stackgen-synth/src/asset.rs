//! File assets and the asset manifest.
//!
//! A directory asset is fingerprinted with SHA-256 over its files, walked in
//! sorted relative-path order. Each file contributes its relative path (with
//! `/` separators), a NUL, its length, and its bytes, so the hash is the same
//! on every machine and changes whenever any file is added, removed, renamed,
//! or edited. Symlinked files count as their targets; symlinked directories
//! and non UTF-8 names are rejected. The deployment tool zips and uploads the directory to
//! `<hash>.zip` in the bootstrap asset bucket before deploying.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use stackgen_model::Expr;
use stackgen_model::resources::lambda::S3Code;

use crate::error::{SynthError, SynthResult};

/// Bootstrap bucket assets are uploaded to.
pub const ASSET_BUCKET: &str = "stackgen-assets-${AWS::AccountId}-${AWS::Region}";

/// Asset manifest format version.
pub const MANIFEST_VERSION: &str = "1.0";

/// Where a function's or layer's code comes from.
///
/// In JSON: `{"directory": "assets/function"}` or
/// `{"s3": {"bucket": "artifacts", "key": "function.zip"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CodeLocation {
    /// A zip archive already in S3.
    S3 {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
    },
    /// A local directory packaged as an asset.
    Directory(PathBuf),
}

/// A staged asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Source directory as given.
    pub path: PathBuf,
    /// Content hash.
    pub hash: String,
    /// Packaging, always `zip`.
    pub packaging: String,
    /// Destination bucket (with pseudo parameter placeholders).
    pub bucket_name: String,
    /// Destination object key.
    pub object_key: String,
}

impl Asset {
    /// Fingerprint a directory.
    pub fn from_directory(path: &Path) -> SynthResult<Self> {
        let hash = hash_directory(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            object_key: format!("{hash}.zip"),
            hash,
            packaging: "zip".to_owned(),
            bucket_name: ASSET_BUCKET.to_owned(),
        })
    }

    /// Code location pointing at the uploaded archive.
    #[must_use]
    pub fn code(&self) -> S3Code {
        S3Code {
            s3_bucket: Expr::sub(&self.bucket_name),
            s3_key: Expr::lit(&self.object_key),
        }
    }
}

/// The `<StackName>.assets.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetManifest {
    /// Manifest format version.
    pub version: String,
    /// Assets by hash.
    pub files: BTreeMap<String, Asset>,
}

impl AssetManifest {
    /// Manifest listing the given assets.
    #[must_use]
    pub fn new<'a>(assets: impl IntoIterator<Item = &'a Asset>) -> Self {
        Self {
            version: MANIFEST_VERSION.to_owned(),
            files: assets
                .into_iter()
                .map(|a| (a.hash.clone(), a.clone()))
                .collect(),
        }
    }
}

/// Hash a directory's contents. See the module docs for the exact scheme.
pub fn hash_directory(root: &Path) -> SynthResult<String> {
    let asset_err = |source| SynthError::Asset {
        path: root.to_path_buf(),
        source,
    };

    let meta = fs::metadata(root).map_err(asset_err)?;
    if !meta.is_dir() {
        return Err(asset_err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "asset path is not a directory",
        )));
    }

    let mut files = Vec::new();
    collect_files(root, root, &mut files).map_err(asset_err)?;
    files.sort();

    let mut hasher = Sha256::new();
    for rel in &files {
        let bytes = fs::read(root.join(rel)).map_err(asset_err)?;
        hasher.update(rel.as_bytes());
        hasher.update([0u8]);
        hasher.update((bytes.len() as u64).to_be_bytes());
        hasher.update(&bytes);
    }

    Ok(hex::encode(hasher.finalize()))
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(root, &path, out)?;
            continue;
        }

        // Symlinked files are hashed by target content, like the archive
        // stores them. Symlinked directories may loop and are refused.
        let is_file = if file_type.is_symlink() {
            let target = fs::metadata(&path)?;
            if target.is_dir() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("symlinked directory in asset: {}", path.display()),
                ));
            }
            target.is_file()
        } else {
            file_type.is_file()
        };
        if !is_file {
            continue;
        }

        let rel = path
            .strip_prefix(root)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let parts = rel
            .components()
            .map(|c| {
                c.as_os_str().to_str().ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("non UTF-8 file name in asset: {}", path.display()),
                    )
                })
            })
            .collect::<std::io::Result<Vec<_>>>()?;
        out.push(parts.join("/"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_should_hash_directory_deterministically() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        for dir in [a.path(), b.path()] {
            write(dir, "app.py", "def handler(event, ctx): pass\n");
            write(dir, "lib/util.py", "X = 1\n");
        }
        assert_eq!(
            hash_directory(a.path()).unwrap(),
            hash_directory(b.path()).unwrap()
        );
    }

    #[test]
    fn test_should_change_hash_when_content_changes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "app.py", "v1");
        let before = hash_directory(dir.path()).unwrap();
        write(dir.path(), "app.py", "v2");
        let after = hash_directory(dir.path()).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_should_change_hash_when_file_is_renamed() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.py", "same");
        let before = hash_directory(dir.path()).unwrap();
        fs::rename(dir.path().join("a.py"), dir.path().join("b.py")).unwrap();
        assert_ne!(before, hash_directory(dir.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_should_hash_symlinked_file_by_target_content() {
        let outside = tempfile::tempdir().unwrap();
        write(outside.path(), "shared.py", "v1");
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "app.py", "");
        std::os::unix::fs::symlink(outside.path().join("shared.py"), dir.path().join("shared.py"))
            .unwrap();

        let before = hash_directory(dir.path()).unwrap();
        write(outside.path(), "shared.py", "v2");
        assert_ne!(before, hash_directory(dir.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_should_reject_symlinked_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "lib/util.py", "");
        std::os::unix::fs::symlink(dir.path().join("lib"), dir.path().join("loop")).unwrap();
        assert!(matches!(
            hash_directory(dir.path()),
            Err(SynthError::Asset { .. })
        ));
    }

    #[test]
    fn test_should_reject_missing_asset_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = hash_directory(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, SynthError::Asset { .. }));
    }

    #[test]
    fn test_should_point_code_at_hashed_key() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.py", "");
        let asset = Asset::from_directory(dir.path()).unwrap();
        let code = serde_json::to_value(asset.code()).unwrap();
        assert_eq!(code["S3Key"], format!("{}.zip", asset.hash));
        assert_eq!(code["S3Bucket"]["Fn::Sub"], ASSET_BUCKET);
    }

    #[test]
    fn test_should_key_manifest_by_hash() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.py", "");
        let asset = Asset::from_directory(dir.path()).unwrap();
        let manifest = AssetManifest::new([&asset]);
        assert_eq!(manifest.files.len(), 1);
        assert!(manifest.files.contains_key(&asset.hash));
    }
}

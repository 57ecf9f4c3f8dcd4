//! `AWS::Lambda::Function`, `AWS::Lambda::LayerVersion`, and
//! `AWS::Lambda::Permission`.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ResourceProperties, Tag};
use crate::Expr;

/// Lambda runtime identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Runtime {
    /// Python 3.9.
    #[serde(rename = "python3.9")]
    Python39,
    /// Python 3.10.
    #[serde(rename = "python3.10")]
    Python310,
    /// Python 3.11.
    #[serde(rename = "python3.11")]
    Python311,
    /// Default variant.
    #[default]
    #[serde(rename = "python3.12")]
    Python312,
    /// Python 3.13.
    #[serde(rename = "python3.13")]
    Python313,
    /// Node.js 18.
    #[serde(rename = "nodejs18.x")]
    Nodejs18x,
    /// Node.js 20.
    #[serde(rename = "nodejs20.x")]
    Nodejs20x,
    /// Node.js 22.
    #[serde(rename = "nodejs22.x")]
    Nodejs22x,
    /// Java 17.
    #[serde(rename = "java17")]
    Java17,
    /// Java 21.
    #[serde(rename = "java21")]
    Java21,
    /// OS-only runtime on Amazon Linux 2.
    #[serde(rename = "provided.al2")]
    ProvidedAl2,
    /// OS-only runtime on Amazon Linux 2023.
    #[serde(rename = "provided.al2023")]
    ProvidedAl2023,
}

impl Runtime {
    /// All known runtimes.
    pub const ALL: [Self; 12] = [
        Self::Python39,
        Self::Python310,
        Self::Python311,
        Self::Python312,
        Self::Python313,
        Self::Nodejs18x,
        Self::Nodejs20x,
        Self::Nodejs22x,
        Self::Java17,
        Self::Java21,
        Self::ProvidedAl2,
        Self::ProvidedAl2023,
    ];

    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python39 => "python3.9",
            Self::Python310 => "python3.10",
            Self::Python311 => "python3.11",
            Self::Python312 => "python3.12",
            Self::Python313 => "python3.13",
            Self::Nodejs18x => "nodejs18.x",
            Self::Nodejs20x => "nodejs20.x",
            Self::Nodejs22x => "nodejs22.x",
            Self::Java17 => "java17",
            Self::Java21 => "java21",
            Self::ProvidedAl2 => "provided.al2",
            Self::ProvidedAl2023 => "provided.al2023",
        }
    }

    /// Custom runtimes have no handler convention; the handler is informational.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::ProvidedAl2 | Self::ProvidedAl2023)
    }
}

impl std::fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Runtime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown Lambda runtime: {s}"))
    }
}

/// Instruction set architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Architecture {
    /// Default variant.
    #[default]
    #[serde(rename = "x86_64")]
    X86_64,
    /// 64-bit ARM (Graviton).
    #[serde(rename = "arm64")]
    Arm64,
}

/// Deployment package location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S3Code {
    /// Bucket holding the zip archive.
    #[serde(rename = "S3Bucket")]
    pub s3_bucket: Expr,
    /// Key of the zip archive.
    #[serde(rename = "S3Key")]
    pub s3_key: Expr,
}

/// Properties of `AWS::Lambda::LayerVersion`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LayerVersionProperties {
    /// Layer name; generated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_name: Option<String>,
    /// Layer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Layer archive location.
    pub content: S3Code,
    /// Runtimes the layer supports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compatible_runtimes: Vec<Runtime>,
}

impl ResourceProperties for LayerVersionProperties {
    const RESOURCE_TYPE: &'static str = "AWS::Lambda::LayerVersion";
}

/// `Environment` block of a function.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Environment {
    /// Environment variables by name.
    pub variables: BTreeMap<String, Expr>,
}

/// `LoggingConfig` block of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingConfig {
    /// Name of the log group the function writes to.
    pub log_group: Expr,
}

/// Properties of `AWS::Lambda::Function`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionProperties {
    /// Function name; generated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    /// Function description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Runtime identifier.
    pub runtime: Runtime,
    /// Entry point, e.g. `index.handler`.
    pub handler: String,
    /// Deployment package location.
    pub code: S3Code,
    /// ARN of the execution role.
    pub role: Expr,
    /// Seconds.
    pub timeout: u32,
    /// Megabytes.
    pub memory_size: u32,
    /// Instruction set; exactly one entry.
    pub architectures: Vec<Architecture>,
    /// ARNs of attached layer versions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<Expr>,
    /// Environment variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    /// Log destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging_config: Option<LoggingConfig>,
    /// Resource tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl ResourceProperties for FunctionProperties {
    const RESOURCE_TYPE: &'static str = "AWS::Lambda::Function";
}

/// Properties of `AWS::Lambda::Permission`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionProperties {
    /// Granted action, e.g. `lambda:InvokeFunction`.
    pub action: String,
    /// Function name or ARN.
    pub function_name: Expr,
    /// Service principal allowed to invoke.
    pub principal: String,
    /// Account the source resource must belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_account: Option<Expr>,
    /// ARN of the resource allowed to invoke.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_arn: Option<Expr>,
}

impl ResourceProperties for PermissionProperties {
    const RESOURCE_TYPE: &'static str = "AWS::Lambda::Permission";
}

//! `AWS::Logs::LogGroup`.

use serde::Serialize;

use super::{ResourceProperties, Tag};

/// Retention periods CloudWatch Logs accepts, in days.
pub const VALID_RETENTION_DAYS: [u32; 22] = [
    1, 3, 5, 7, 14, 30, 60, 90, 120, 150, 180, 365, 400, 545, 731, 1096, 1827, 2192, 2557, 2922,
    3288, 3653,
];

/// Properties of `AWS::Logs::LogGroup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogGroupProperties {
    /// Log group name; generated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_group_name: Option<String>,
    /// Days to keep events; never expire when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_in_days: Option<u32>,
    /// Resource tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl ResourceProperties for LogGroupProperties {
    const RESOURCE_TYPE: &'static str = "AWS::Logs::LogGroup";
}

//! CloudFormation intrinsic functions.
//!
//! [`Expr`] is any template value that may be resolved at deploy time. It
//! serializes to the intrinsic's JSON form:
//!
//! | Variant | JSON |
//! |---------|------|
//! | `Literal("x")` | `"x"` |
//! | `Ref("Id")` | `{"Ref": "Id"}` |
//! | `GetAtt("Id", "Arn")` | `{"Fn::GetAtt": ["Id", "Arn"]}` |
//! | `Sub("arn:${AWS::Partition}:...")` | `{"Fn::Sub": "..."}` |
//! | `Join(",", [..])` | `{"Fn::Join": [",", [..]]}` |

use std::collections::BTreeSet;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// `AWS::AccountId` pseudo parameter.
pub const PSEUDO_ACCOUNT_ID: &str = "AWS::AccountId";
/// `AWS::Region` pseudo parameter.
pub const PSEUDO_REGION: &str = "AWS::Region";
/// `AWS::Partition` pseudo parameter.
pub const PSEUDO_PARTITION: &str = "AWS::Partition";
/// `AWS::StackName` pseudo parameter.
pub const PSEUDO_STACK_NAME: &str = "AWS::StackName";

/// A template value, literal or intrinsic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Plain string.
    Literal(String),
    /// `Ref` to a resource or pseudo parameter.
    Ref(String),
    /// `Fn::GetAtt` of a resource attribute.
    GetAtt(String, String),
    /// `Fn::Sub` with `${...}` placeholders.
    Sub(String),
    /// `Fn::Join` of values with a separator.
    Join(String, Vec<Expr>),
}

impl Expr {
    /// Literal string value.
    #[must_use]
    pub fn lit(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// `Ref` to a logical ID or pseudo parameter.
    #[must_use]
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Self::Ref(logical_id.into())
    }

    /// `Fn::GetAtt` of `logical_id.attribute`.
    #[must_use]
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt(logical_id.into(), attribute.into())
    }

    /// `Fn::Sub` of a template string.
    #[must_use]
    pub fn sub(template: impl Into<String>) -> Self {
        Self::Sub(template.into())
    }

    /// The literal string, if this value needs no deploy-time resolution.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_owned())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(s) => serializer.serialize_str(s),
            Self::Ref(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", id)?;
                map.end()
            }
            Self::GetAtt(id, attr) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[id, attr])?;
                map.end()
            }
            Self::Sub(template) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Sub", template)?;
                map.end()
            }
            Self::Join(sep, parts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &JoinArgs(sep, parts))?;
                map.end()
            }
        }
    }
}

struct JoinArgs<'a>(&'a str, &'a [Expr]);

impl Serialize for JoinArgs<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(self.0)?;
        seq.serialize_element(self.1)?;
        seq.end()
    }
}

/// Whether a name is a pseudo parameter (`AWS::...`) rather than a resource.
#[must_use]
pub fn is_pseudo_parameter(name: &str) -> bool {
    name.starts_with("AWS::")
}

/// Collect the logical IDs a rendered JSON value refers to.
///
/// Looks at `Ref`, `Fn::GetAtt` (both list and dotted-string forms), and
/// `${...}` placeholders in `Fn::Sub`. Pseudo parameters, `${!Literal}`
/// escapes, and names bound by an `Fn::Sub` variable map are skipped.
#[must_use]
pub fn collect_references(value: &Value) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();
    walk(value, &mut refs);
    refs
}

fn walk(value: &Value, refs: &mut BTreeSet<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|v| walk(v, refs)),
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(target) = map.get("Ref").and_then(Value::as_str) {
                    if !is_pseudo_parameter(target) {
                        refs.insert(target.to_owned());
                    }
                    return;
                }
                if let Some(args) = map.get("Fn::GetAtt") {
                    let target = match args {
                        Value::Array(parts) => parts.first().and_then(Value::as_str),
                        Value::String(dotted) => dotted.split('.').next(),
                        _ => None,
                    };
                    if let Some(target) = target {
                        refs.insert(target.to_owned());
                    }
                    return;
                }
                if let Some(args) = map.get("Fn::Sub") {
                    match args {
                        Value::String(template) => sub_placeholders(template, &[], refs),
                        Value::Array(parts) => {
                            let bound: Vec<&str> = parts
                                .get(1)
                                .and_then(Value::as_object)
                                .map(|vars| vars.keys().map(String::as_str).collect())
                                .unwrap_or_default();
                            if let Some(template) = parts.first().and_then(Value::as_str) {
                                sub_placeholders(template, &bound, refs);
                            }
                            if let Some(vars) = parts.get(1) {
                                walk(vars, refs);
                            }
                        }
                        _ => {}
                    }
                    return;
                }
            }
            map.values().for_each(|v| walk(v, refs));
        }
        _ => {}
    }
}

fn sub_placeholders(template: &str, bound: &[&str], refs: &mut BTreeSet<String>) {
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        rest = &after[end + 1..];

        if name.starts_with('!') {
            continue;
        }
        let target = name.split('.').next().unwrap_or(name);
        if target.is_empty() || is_pseudo_parameter(target) || bound.contains(&target) {
            continue;
        }
        refs.insert(target.to_owned());
    }
}

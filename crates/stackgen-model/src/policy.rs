//! IAM policy documents.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::Expr;

/// IAM policy language version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Effect {
    /// Grant.
    #[default]
    Allow,
    /// Explicit deny.
    Deny,
}

impl Effect {
    /// Returns the string value of this effect.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Principal {
    /// An AWS service, e.g. `lambda.amazonaws.com`.
    Service(String),
    /// An AWS principal; `"*"` means anyone.
    #[serde(rename = "AWS")]
    Aws(String),
}

/// A single policy statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    /// Optional statement ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// Allow or deny.
    pub effect: Effect,
    /// Principal, only used in resource and trust policies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    /// Action identifiers, e.g. `s3:GetObject`.
    pub action: Vec<String>,
    /// Resources the statement applies to. Trust policies have none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<Expr>,
    /// Condition block: operator -> key -> value.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub condition: BTreeMap<String, BTreeMap<String, Value>>,
}

impl Statement {
    /// Allow `actions` on `resources`.
    #[must_use]
    pub fn allow<A: Into<String>>(actions: impl IntoIterator<Item = A>, resources: Vec<Expr>) -> Self {
        Self {
            sid: None,
            effect: Effect::Allow,
            principal: None,
            action: actions.into_iter().map(Into::into).collect(),
            resource: resources,
            condition: BTreeMap::new(),
        }
    }

    /// Trust statement letting a service assume a role.
    #[must_use]
    pub fn assume_role(service: impl Into<String>) -> Self {
        Self {
            principal: Some(Principal::Service(service.into())),
            ..Self::allow(["sts:AssumeRole"], Vec::new())
        }
    }

    /// Deny any request to `resources` that does not use TLS.
    #[must_use]
    pub fn deny_insecure_transport(resources: Vec<Expr>) -> Self {
        let mut condition = BTreeMap::new();
        condition.insert(
            "Bool".to_owned(),
            BTreeMap::from([("aws:SecureTransport".to_owned(), Value::String("false".into()))]),
        );
        Self {
            sid: None,
            effect: Effect::Deny,
            principal: Some(Principal::Aws("*".to_owned())),
            action: vec!["s3:*".to_owned()],
            resource: resources,
            condition,
        }
    }

    /// Set the statement ID.
    #[must_use]
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }
}

/// An IAM policy document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Policy language version.
    pub version: String,
    /// Statements.
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    /// Document with the given statements.
    #[must_use]
    pub fn new(statement: Vec<Statement>) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement,
        }
    }

    /// Every action allowed by this document, in statement order.
    pub fn allowed_actions(&self) -> impl Iterator<Item = &str> {
        self.statement
            .iter()
            .filter(|s| s.effect == Effect::Allow)
            .flat_map(|s| s.action.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_serialize_trust_policy() {
        let doc = PolicyDocument::new(vec![Statement::assume_role("lambda.amazonaws.com")]);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": {"Service": "lambda.amazonaws.com"},
                    "Action": ["sts:AssumeRole"]
                }]
            })
        );
    }

    #[test]
    fn test_should_serialize_tls_deny_statement() {
        let stmt = Statement::deny_insecure_transport(vec![Expr::get_att("B", "Arn")]);
        let value = serde_json::to_value(&stmt).unwrap();
        assert_eq!(value["Effect"], "Deny");
        assert_eq!(value["Principal"], json!({"AWS": "*"}));
        assert_eq!(value["Condition"]["Bool"]["aws:SecureTransport"], "false");
    }

    #[test]
    fn test_should_list_only_allowed_actions() {
        let doc = PolicyDocument::new(vec![
            Statement::allow(["s3:GetObject"], vec![Expr::lit("*")]),
            Statement::deny_insecure_transport(vec![Expr::lit("*")]),
        ]);
        let actions: Vec<&str> = doc.allowed_actions().collect();
        assert_eq!(actions, vec!["s3:GetObject"]);
    }
}

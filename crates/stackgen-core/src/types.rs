//! Deployment environment types shared across crates.

use std::fmt;

use crate::StackgenError;

/// AWS Account ID (12-digit string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account ID from a string.
    ///
    /// # Errors
    /// Returns an error if the account ID is not a 12-digit numeric string.
    pub fn new(id: impl Into<String>) -> Result<Self, StackgenError> {
        let id = id.into();
        if id.len() != 12 || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(StackgenError::InvalidAccountId(id));
        }
        Ok(Self(id))
    }

    /// Get the account ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Region used when none is configured.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target environment identifier, e.g. `dev` or `prod`.
///
/// The name ends up in stack names, tags, and the function's `ENVIRONMENT`
/// variable, so it is restricted to lowercase letters, digits, and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EnvironmentName(String);

impl EnvironmentName {
    /// Environment used when none is configured.
    pub const DEFAULT: &str = "dev";

    const MAX_LEN: usize = 32;

    /// Create a new environment name.
    ///
    /// # Errors
    /// Returns an error if the name is empty, longer than 32 characters, or
    /// contains anything but lowercase letters, digits, and hyphens.
    pub fn new(name: impl Into<String>) -> Result<Self, StackgenError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name.len() <= Self::MAX_LEN
            && name
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
            && !name.starts_with('-')
            && !name.ends_with('-');
        if !valid {
            return Err(StackgenError::InvalidEnvironmentName(name));
        }
        Ok(Self(name))
    }

    /// Get the environment name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name in PascalCase, suitable for stack names (`qa-eu` -> `QaEu`).
    #[must_use]
    pub fn to_pascal_case(&self) -> String {
        self.0
            .split('-')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect()
    }
}

impl Default for EnvironmentName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EnvironmentName {
    type Error = StackgenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EnvironmentName> for String {
    fn from(value: EnvironmentName) -> Self {
        value.0
    }
}

/// Where a stack is deployed.
///
/// The account is optional: an environment-agnostic template resolves it at
/// deploy time through the `AWS::AccountId` pseudo parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeploymentEnv {
    /// Environment identifier.
    pub name: EnvironmentName,
    /// Target region.
    pub region: AwsRegion,
    /// Target account, if pinned.
    pub account: Option<AccountId>,
}

impl DeploymentEnv {
    /// Create an environment in the default region with no pinned account.
    #[must_use]
    pub fn new(name: EnvironmentName) -> Self {
        Self {
            name,
            region: AwsRegion::default(),
            account: None,
        }
    }

    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: AwsRegion) -> Self {
        self.region = region;
        self
    }

    /// Pin the account.
    #[must_use]
    pub fn with_account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }
}

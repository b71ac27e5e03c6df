//! Permission codes of the form `resource:action:scope`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use scopegate_core::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Verb part of a permission code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionAction {
    /// Read access.
    View,
    /// Modify access.
    Edit,
    /// Create new records.
    Create,
    /// Delete records.
    Delete,
    /// Approve pending requests.
    Approve,
    /// Reject pending requests.
    Reject,
    /// Export data.
    Export,
    /// Upload files such as documents.
    Upload,
    /// Administrative management.
    Manage,
    /// Assign something to someone.
    Assign,
    /// Grant a right.
    Grant,
    /// Revoke a right.
    Revoke,
    /// Submit a request.
    Submit,
    /// Cancel a request.
    Cancel,
    /// Run a process such as payroll.
    Run,
    /// Reset another account's password.
    ResetPassword,
}

impl PermissionAction {
    /// Returns the stable code segment for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Export => "export",
            Self::Upload => "upload",
            Self::Manage => "manage",
            Self::Assign => "assign",
            Self::Grant => "grant",
            Self::Revoke => "revoke",
            Self::Submit => "submit",
            Self::Cancel => "cancel",
            Self::Run => "run",
            Self::ResetPassword => "reset-password",
        }
    }

    /// Returns all known actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionAction] = &[
            PermissionAction::View,
            PermissionAction::Edit,
            PermissionAction::Create,
            PermissionAction::Delete,
            PermissionAction::Approve,
            PermissionAction::Reject,
            PermissionAction::Export,
            PermissionAction::Upload,
            PermissionAction::Manage,
            PermissionAction::Assign,
            PermissionAction::Grant,
            PermissionAction::Revoke,
            PermissionAction::Submit,
            PermissionAction::Cancel,
            PermissionAction::Run,
            PermissionAction::ResetPassword,
        ];

        ALL
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::UnknownPermissionCode(format!("unknown action '{value}'")))
    }
}

impl Display for PermissionAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Breadth of a grant relative to the actor's position in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionScope {
    /// The actor's own records.
    Own,
    /// Records of anyone below the actor in the reporting hierarchy.
    Team,
    /// Records of employees sharing the actor's department.
    Department,
    /// Records of anyone in the actor's organization.
    Organization,
}

impl PermissionScope {
    /// Returns the stable code segment for this scope.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Team => "team",
            Self::Department => "department",
            Self::Organization => "organization",
        }
    }

    /// Returns all scopes ordered from narrowest to widest.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionScope] = &[
            PermissionScope::Own,
            PermissionScope::Team,
            PermissionScope::Department,
            PermissionScope::Organization,
        ];

        ALL
    }
}

impl FromStr for PermissionScope {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "own" => Ok(Self::Own),
            "team" => Ok(Self::Team),
            "department" => Ok(Self::Department),
            "organization" => Ok(Self::Organization),
            _ => Err(AppError::UnknownPermissionCode(format!(
                "unknown scope '{value}'"
            ))),
        }
    }
}

impl Display for PermissionScope {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A permission code: `resource:action:scope`.
///
/// The resource segment is lowercase ASCII letters, digits and dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermissionCode {
    resource: String,
    action: PermissionAction,
    scope: PermissionScope,
}

impl PermissionCode {
    /// Creates a permission code after validating the resource segment.
    pub fn new(
        resource: impl Into<String>,
        action: PermissionAction,
        scope: PermissionScope,
    ) -> AppResult<Self> {
        let resource = resource.into();
        validate_resource_name(resource.as_str())?;

        Ok(Self {
            resource,
            action,
            scope,
        })
    }

    /// Returns the resource segment.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.resource.as_str()
    }

    /// Returns the action segment.
    #[must_use]
    pub fn action(&self) -> PermissionAction {
        self.action
    }

    /// Returns the scope segment.
    #[must_use]
    pub fn scope(&self) -> PermissionScope {
        self.scope
    }

    /// Returns the same resource and action at another scope.
    #[must_use]
    pub fn with_scope(&self, scope: PermissionScope) -> Self {
        Self {
            resource: self.resource.clone(),
            action: self.action,
            scope,
        }
    }
}

/// Validates a resource name used as the first code segment.
pub fn validate_resource_name(resource: &str) -> AppResult<()> {
    let is_valid = !resource.is_empty()
        && resource
            .chars()
            .all(|character| character.is_ascii_lowercase() || character.is_ascii_digit() || character == '-');

    if !is_valid {
        return Err(AppError::UnknownPermissionCode(format!(
            "invalid resource name '{resource}'"
        )));
    }

    Ok(())
}

impl Display for PermissionCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{}:{}", self.resource, self.action, self.scope)
    }
}

impl FromStr for PermissionCode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut segments = value.split(':');
        let (Some(resource), Some(action), Some(scope), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(AppError::UnknownPermissionCode(format!(
                "malformed permission code '{value}'"
            )));
        };

        Self::new(resource, action.parse()?, scope.parse()?)
    }
}

impl Serialize for PermissionCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PermissionCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

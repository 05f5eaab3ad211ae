//! Explicit access grants on a document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Permission level conveyed by a grant.
///
/// Ordered by privilege: Edit > View. Edit implies view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantLevel {
    /// Read-only access.
    View,
    /// Content and metadata modification (includes view).
    Edit,
}

impl GrantLevel {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Edit => 2,
            Self::View => 1,
        }
    }

    /// Check if this level satisfies the required level.
    pub fn has_at_least(&self, required: GrantLevel) -> bool {
        self.privilege_level() >= required.privilege_level()
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }
}

impl std::fmt::Display for GrantLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The principal a grant applies to. Exactly one of user or department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum GrantPrincipal {
    /// A single user.
    User(Uuid),
    /// Every member of a department.
    Department(Uuid),
}

/// An explicit access grant on a document.
///
/// Grants are owned by the document they qualify and are destroyed with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Unique grant identifier.
    pub id: Uuid,
    /// The document this grant applies to.
    pub document_id: Uuid,
    /// Who the grant applies to.
    pub principal: GrantPrincipal,
    /// The conveyed permission level.
    pub level: GrantLevel,
    /// The user who created the grant.
    pub granted_by: Uuid,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

impl AccessGrant {
    /// Whether this grant applies directly to the given user.
    pub fn applies_to_user(&self, user_id: Uuid) -> bool {
        matches!(self.principal, GrantPrincipal::User(id) if id == user_id)
    }

    /// Whether this grant applies to one of the given departments.
    pub fn applies_to_departments(&self, department_ids: &[Uuid]) -> bool {
        matches!(self.principal, GrantPrincipal::Department(id) if department_ids.contains(&id))
    }
}

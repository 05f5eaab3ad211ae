//! Request context carrying the authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_entity::principal::PrincipalRole;

/// Context for the current authenticated request.
///
/// Supplied by the external identity/session provider and passed into every
/// service method so each operation knows *who* is acting. The core trusts
/// these values; it performs no authentication itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's company.
    pub company_id: Uuid,
    /// Departments the user belongs to.
    pub department_ids: Vec<Uuid>,
    /// The user's role.
    pub role: PrincipalRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        company_id: Uuid,
        department_ids: Vec<Uuid>,
        role: PrincipalRole,
    ) -> Self {
        Self {
            user_id,
            company_id,
            department_ids,
            role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user is at least a manager.
    pub fn is_manager_or_above(&self) -> bool {
        self.role.is_manager_or_above()
    }
}

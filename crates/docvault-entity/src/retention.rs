//! Retention policy entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A retention policy: documents assigned to it become eligible for
/// deletion once `retention_days` have elapsed from the reference date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionPolicy {
    /// Unique policy identifier.
    pub id: Uuid,
    /// The owning company.
    pub company_id: Uuid,
    /// Policy name (e.g. "Financial records - 7 years").
    pub name: String,
    /// Retention duration in days.
    pub retention_days: i64,
    /// Optional description.
    pub description: Option<String>,
    /// When the policy was created.
    pub created_at: DateTime<Utc>,
}

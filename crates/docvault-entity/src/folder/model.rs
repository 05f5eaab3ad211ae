//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A folder in the document hierarchy.
///
/// Folders form a strict tree per company: single parent, no cycles. The
/// tree is stored as an arena of records with a `parent_id` back-reference;
/// `path` is the materialized slash-joined chain of ancestor names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The owning company.
    pub company_id: Uuid,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
    /// Full materialized path (e.g., `/contracts/2025`).
    pub path: String,
    /// Depth in the folder tree (0 for root).
    pub depth: i32,
    /// The user who created the folder.
    pub created_by: Uuid,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new folder record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The owning company.
    pub company_id: Uuid,
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
    /// Full materialized path.
    pub path: String,
    /// Depth in the tree.
    pub depth: i32,
    /// The user creating the folder.
    pub created_by: Uuid,
}

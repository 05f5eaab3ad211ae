//! Document version history entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A historical content version of a document.
///
/// Written whenever a check-in supersedes the current content; the record
/// snapshots the descriptor that was current before the change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// The document this version belongs to.
    pub document_id: Uuid,
    /// Sequential version number.
    pub version_number: i32,
    /// Pointer to this version's content in blob storage.
    pub storage_path: String,
    /// Content hash.
    pub content_hash: String,
    /// Size in bytes.
    pub file_size_bytes: i64,
    /// User who produced this version.
    pub created_by: Uuid,
    /// When this version was recorded.
    pub created_at: DateTime<Utc>,
    /// Optional comment describing the change.
    pub comment: Option<String>,
}

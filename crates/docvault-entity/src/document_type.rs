//! Document type entity: per-company configuration of a class of documents.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document type configured by an administrator.
///
/// `code` is unique per company (case-insensitive, stored uppercase) and
/// immutable once documents reference the type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentType {
    /// Unique type identifier.
    pub id: Uuid,
    /// The owning company.
    pub company_id: Uuid,
    /// Unique uppercase code (e.g. `CON` for contracts).
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Allowed file extensions (lowercase, no dot). Empty = unrestricted.
    pub allowed_extensions: BTreeSet<String>,
    /// Whether documents of this type receive an auto-assigned number.
    pub auto_number_enabled: bool,
    /// Prefix for generated numbers (e.g. `CON`).
    pub auto_number_prefix: String,
    /// Zero-padding width of the running counter (1-10).
    pub auto_number_digits: u8,
    /// Whether the year is embedded in generated numbers.
    pub auto_number_includes_year: bool,
    /// Whether new documents start in the approval workflow.
    pub requires_approval: bool,
    /// Whether the type may be used for new documents.
    pub is_active: bool,
    /// When the type was created.
    pub created_at: DateTime<Utc>,
    /// When the type was last updated.
    pub updated_at: DateTime<Utc>,
}

impl DocumentType {
    /// Whether a file extension is acceptable for this type.
    ///
    /// An empty extension set means the type is unrestricted.
    pub fn extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.is_empty()
            || self.allowed_extensions.contains(&extension.to_lowercase())
    }
}

/// Data required to create a new document type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocumentType {
    /// The owning company.
    pub company_id: Uuid,
    /// Type code (stored uppercase).
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Allowed file extensions. Empty = unrestricted.
    pub allowed_extensions: BTreeSet<String>,
    /// Whether numbering is enabled.
    pub auto_number_enabled: bool,
    /// Number prefix.
    pub auto_number_prefix: String,
    /// Counter width (1-10).
    pub auto_number_digits: u8,
    /// Whether the year is embedded.
    pub auto_number_includes_year: bool,
    /// Whether approval is required.
    pub requires_approval: bool,
}

/// Partial update to a document type. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentTypePatch {
    /// New code. Rejected when any document references the type.
    pub code: Option<String>,
    /// New name.
    pub name: Option<String>,
    /// New extension set.
    pub allowed_extensions: Option<BTreeSet<String>>,
    /// Toggle numbering.
    pub auto_number_enabled: Option<bool>,
    /// New prefix.
    pub auto_number_prefix: Option<String>,
    /// New counter width.
    pub auto_number_digits: Option<u8>,
    /// Toggle year embedding.
    pub auto_number_includes_year: Option<bool>,
    /// Toggle approval requirement.
    pub requires_approval: Option<bool>,
    /// Toggle active flag.
    pub is_active: Option<bool>,
}

//! Document entity model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::{AccessLevel, Classification};
use crate::workflow::DocumentStatus;

use super::checkout::CheckoutState;

/// Opaque content descriptor returned by the external blob storage service.
///
/// The core stores and compares these values; it never opens the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// Pointer into blob storage.
    pub storage_path: String,
    /// Content hash reported by storage.
    pub content_hash: String,
    /// Size in bytes.
    pub file_size_bytes: i64,
}

/// A versioned document record.
///
/// Every document belongs to exactly one folder. File bytes live in external
/// blob storage; this record only carries the descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// The owning company.
    pub company_id: Uuid,
    /// The containing folder.
    pub folder_id: Uuid,
    /// Document name (including extension).
    pub name: String,
    /// Auto-assigned number, when the type has numbering enabled.
    pub document_number: Option<String>,
    /// The document type.
    pub document_type_id: Uuid,
    /// File type / extension label (e.g. `pdf`).
    pub file_type: String,
    /// Size in bytes, as reported by blob storage.
    pub file_size_bytes: i64,
    /// Content hash, as reported by blob storage.
    pub content_hash: String,
    /// Opaque pointer into blob storage.
    pub storage_path: String,
    /// Monotonically increasing version, starts at 1.
    pub version: i32,
    /// Workflow state.
    pub status: DocumentStatus,
    /// Confidentiality label; authoritative for access decisions.
    pub classification: Classification,
    /// Legacy coarse access flag, retained for backward compatibility.
    pub access_level: AccessLevel,
    /// Free-form category.
    pub category: Option<String>,
    /// Tags.
    pub tags: BTreeSet<String>,
    /// The document owner.
    pub owned_by_user_id: Uuid,
    /// The user who uploaded the current content.
    pub uploaded_by_user_id: Uuid,
    /// Projection of the checkout state: whether a lock is held.
    pub is_checked_out: bool,
    /// Projection: the lock holder.
    pub checked_out_by_user_id: Option<Uuid>,
    /// Projection: when the lock was acquired.
    pub checked_out_at: Option<DateTime<Utc>>,
    /// Projection: when the lease lapses.
    pub check_out_expires_at: Option<DateTime<Utc>>,
    /// Projection: displaced holder still entitled to one grace check-in.
    pub checkout_grace_user_id: Option<Uuid>,
    /// Whether the document is under legal hold.
    pub legal_hold: bool,
    /// The assigned retention policy, if any.
    pub retention_policy_id: Option<Uuid>,
    /// When the retention period lapses. Computed once at policy assignment.
    pub retention_expires_at: Option<DateTime<Utc>>,
    /// Next scheduled review date.
    pub review_date: Option<DateTime<Utc>>,
    /// Review cadence in days.
    pub review_frequency_days: Option<i32>,
    /// When the document was last reviewed.
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// Who last reviewed the document.
    pub last_reviewed_by: Option<Uuid>,
    /// Who approved the document.
    pub approved_by_user_id: Option<Uuid>,
    /// When the document was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Reviewer notes from the last approve/reject decision.
    pub approval_notes: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Whether the record is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether the given user owns the document.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owned_by_user_id == user_id || self.uploaded_by_user_id == user_id
    }

    /// Reconstruct the authoritative checkout state from the projection
    /// columns.
    pub fn checkout_state(&self) -> CheckoutState {
        match (
            self.is_checked_out,
            self.checked_out_by_user_id,
            self.checked_out_at,
            self.check_out_expires_at,
        ) {
            (true, Some(by), Some(at), Some(expires_at)) => CheckoutState::CheckedOut {
                by,
                at,
                expires_at,
                grace_user: self.checkout_grace_user_id,
            },
            _ => CheckoutState::Available,
        }
    }

    /// Write the checkout state back to the projection columns.
    pub fn set_checkout_state(&mut self, state: &CheckoutState) {
        match *state {
            CheckoutState::Available => {
                self.is_checked_out = false;
                self.checked_out_by_user_id = None;
                self.checked_out_at = None;
                self.check_out_expires_at = None;
                self.checkout_grace_user_id = None;
            }
            CheckoutState::CheckedOut {
                by,
                at,
                expires_at,
                grace_user,
            } => {
                self.is_checked_out = true;
                self.checked_out_by_user_id = Some(by);
                self.checked_out_at = Some(at);
                self.check_out_expires_at = Some(expires_at);
                self.checkout_grace_user_id = grace_user;
            }
        }
    }

    /// Apply a new content descriptor, bumping the version.
    pub fn apply_content(&mut self, content: &ContentDescriptor, uploaded_by: Uuid) {
        self.version += 1;
        self.storage_path = content.storage_path.clone();
        self.content_hash = content.content_hash.clone();
        self.file_size_bytes = content.file_size_bytes;
        self.uploaded_by_user_id = uploaded_by;
    }
}

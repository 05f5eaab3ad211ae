//! Policy guards consulted before destructive or content-changing
//! operations.
//!
//! Legal hold blocks unconditionally. Retention blocks deletion until the
//! expiry date unless the caller supplies the administrative override;
//! the override never applies to a legal hold.

use chrono::{DateTime, Utc};

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::document::Document;

/// Check whether a document may be deleted at `now`.
pub fn ensure_deletable(
    document: &Document,
    now: DateTime<Utc>,
    override_retention: bool,
) -> AppResult<()> {
    if document.legal_hold {
        return Err(AppError::LegalHoldActive);
    }
    if let Some(expires_at) = document.retention_expires_at {
        if expires_at > now && !override_retention {
            return Err(AppError::RetentionActive { expires_at });
        }
    }
    Ok(())
}

/// Check whether a document's content may change (checkout, content
/// check-in). Metadata-only edits are not subject to this guard.
pub fn ensure_content_mutable(document: &Document) -> AppResult<()> {
    if document.legal_hold {
        return Err(AppError::LegalHoldActive);
    }
    Ok(())
}

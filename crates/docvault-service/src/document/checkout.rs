//! Exclusive-edit checkout locking.
//!
//! Acquisition and release both run inside the document's exclusive entry
//! lock in the store, so "read current holder, compare, write new holder"
//! is one atomic step — two principals can never both believe they hold
//! the lock.

use std::sync::Arc;

use chrono::Duration;
use tracing::info;
use uuid::Uuid;

use docvault_core::clock::Clock;
use docvault_core::config::checkout::CheckoutConfig;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::document::{CheckinOutcome, ContentDescriptor, Document, DocumentVersion};
use docvault_store::repositories::DocumentRepository;

use crate::access::AccessEvaluator;
use crate::context::RequestContext;
use crate::retention;

/// Manages the checkout lock lifecycle.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    /// Document repository.
    doc_repo: Arc<DocumentRepository>,
    /// Access resolver.
    evaluator: Arc<AccessEvaluator>,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Lease duration.
    lease: Duration,
}

impl CheckoutService {
    /// Creates a new checkout service.
    pub fn new(
        doc_repo: Arc<DocumentRepository>,
        evaluator: Arc<AccessEvaluator>,
        clock: Arc<dyn Clock>,
        config: &CheckoutConfig,
    ) -> Self {
        Self {
            doc_repo,
            evaluator,
            clock,
            lease: Duration::minutes(config.lease_minutes),
        }
    }

    /// Checks out a document for exclusive editing.
    ///
    /// Fails with `LegalHoldActive` on a held document and with
    /// `AlreadyCheckedOut` while another user's lease is unexpired. An
    /// expired lease is taken over lazily; the displaced holder keeps a
    /// one-shot grace check-in.
    pub async fn checkout(&self, ctx: &RequestContext, document_id: Uuid) -> AppResult<Document> {
        let document = self
            .doc_repo
            .find_by_id(document_id)
            .await?
            .filter(|d| d.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Document"))?;
        self.evaluator.require_edit(ctx, &document).await?;

        let now = self.clock.now();
        let lease = self.lease;
        let document = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                retention::ensure_content_mutable(doc)?;
                let state = doc.checkout_state().acquire(ctx.user_id, now, lease)?;
                doc.set_checkout_state(&state);
                Ok(doc.clone())
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            expires_at = ?document.check_out_expires_at,
            "Document checked out"
        );

        Ok(document)
    }

    /// Checks a document back in.
    ///
    /// Only the recorded holder (or a graced previous holder) may check in;
    /// the recorded holder succeeds even past lease expiry. Supplying new
    /// content bumps the version and snapshots the superseded content into
    /// the version history; content changes are rejected under legal hold,
    /// while a contentless check-in (releasing the lock) is always allowed.
    pub async fn checkin(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        new_content: Option<ContentDescriptor>,
        comment: Option<String>,
    ) -> AppResult<Document> {
        let now = self.clock.now();

        let (document, outcome, superseded) = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                let (state, outcome) = doc.checkout_state().release(ctx.user_id)?;

                let superseded = match &new_content {
                    Some(content) => {
                        retention::ensure_content_mutable(doc)?;
                        let snapshot = DocumentVersion {
                            id: Uuid::new_v4(),
                            document_id: doc.id,
                            version_number: doc.version,
                            storage_path: doc.storage_path.clone(),
                            content_hash: doc.content_hash.clone(),
                            file_size_bytes: doc.file_size_bytes,
                            created_by: doc.uploaded_by_user_id,
                            created_at: now,
                            comment: comment.clone(),
                        };
                        doc.apply_content(content, ctx.user_id);
                        Some(snapshot)
                    }
                    None => None,
                };

                doc.set_checkout_state(&state);
                Ok((doc.clone(), outcome, superseded))
            })
            .await?;

        if let Some(snapshot) = superseded {
            self.doc_repo.create_version(&snapshot).await?;
        }

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            version = document.version,
            grace = matches!(outcome, CheckinOutcome::Grace),
            "Document checked in"
        );

        Ok(document)
    }
}

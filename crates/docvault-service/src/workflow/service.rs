//! Approval workflow transitions.
//!
//! All status changes funnel through [`DocumentStatus::transition`]; this
//! service adds the who-may-do-it checks and the approval bookkeeping.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_core::clock::Clock;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::document::Document;
use docvault_entity::workflow::DocumentStatus;
use docvault_store::repositories::DocumentRepository;

use crate::access::AccessEvaluator;
use crate::context::RequestContext;

/// Drives document status transitions.
#[derive(Debug, Clone)]
pub struct WorkflowService {
    /// Document repository.
    doc_repo: Arc<DocumentRepository>,
    /// Access resolver.
    evaluator: Arc<AccessEvaluator>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl WorkflowService {
    /// Creates a new workflow service.
    pub fn new(
        doc_repo: Arc<DocumentRepository>,
        evaluator: Arc<AccessEvaluator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            doc_repo,
            evaluator,
            clock,
        }
    }

    async fn load(&self, ctx: &RequestContext, document_id: Uuid) -> AppResult<Document> {
        self.doc_repo
            .find_by_id(document_id)
            .await?
            .filter(|d| d.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Document"))
    }

    /// Submits a draft for review. Requires edit access.
    pub async fn submit_for_review(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> AppResult<Document> {
        let document = self.load(ctx, document_id).await?;
        self.evaluator.require_edit(ctx, &document).await?;

        let document = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                doc.status = doc.status.transition(DocumentStatus::PendingReview)?;
                Ok(doc.clone())
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            "Document submitted for review"
        );

        Ok(document)
    }

    /// Approves a pending document. Managers and administrators only.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        notes: Option<String>,
    ) -> AppResult<Document> {
        if !ctx.is_manager_or_above() {
            return Err(AppError::access_denied("only management approves documents"));
        }
        self.load(ctx, document_id).await?;

        let now = self.clock.now();
        let document = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                doc.status = doc.status.transition(DocumentStatus::Approved)?;
                doc.approved_by_user_id = Some(ctx.user_id);
                doc.approved_at = Some(now);
                doc.approval_notes = notes.clone();
                Ok(doc.clone())
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            "Document approved"
        );

        Ok(document)
    }

    /// Rejects a pending document, returning it to draft so it can be
    /// revised and resubmitted. Managers and administrators only.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        notes: Option<String>,
    ) -> AppResult<Document> {
        if !ctx.is_manager_or_above() {
            return Err(AppError::access_denied("only management rejects documents"));
        }
        self.load(ctx, document_id).await?;

        let document = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                doc.status = doc.status.transition(DocumentStatus::Draft)?;
                doc.approved_by_user_id = None;
                doc.approved_at = None;
                doc.approval_notes = notes.clone();
                Ok(doc.clone())
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            "Document rejected"
        );

        Ok(document)
    }

    /// Publishes an approved document. Requires edit access.
    pub async fn publish(&self, ctx: &RequestContext, document_id: Uuid) -> AppResult<Document> {
        let document = self.load(ctx, document_id).await?;
        self.evaluator.require_edit(ctx, &document).await?;

        let document = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                doc.status = doc.status.transition(DocumentStatus::Published)?;
                Ok(doc.clone())
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            "Document published"
        );

        Ok(document)
    }

    /// Cancels a document from any non-terminal state. Requires edit access.
    pub async fn cancel(&self, ctx: &RequestContext, document_id: Uuid) -> AppResult<Document> {
        let document = self.load(ctx, document_id).await?;
        self.evaluator.require_edit(ctx, &document).await?;

        let document = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                doc.status = doc.status.transition(DocumentStatus::Cancelled)?;
                Ok(doc.clone())
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            "Document cancelled"
        );

        Ok(document)
    }
}

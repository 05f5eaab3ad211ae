//! Grant management on documents.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::access::{AccessGrant, GrantLevel, GrantPrincipal};
use docvault_store::repositories::{AccessGrantRepository, DocumentRepository};

use crate::context::RequestContext;

use super::evaluator::AccessEvaluator;

/// Request to grant access on a document.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GrantRequest {
    /// Who the grant applies to (a user or a department, never both).
    pub principal: GrantPrincipal,
    /// The conveyed permission level.
    pub level: GrantLevel,
}

/// Manages explicit access grants.
#[derive(Debug, Clone)]
pub struct GrantService {
    /// Document repository.
    doc_repo: Arc<DocumentRepository>,
    /// Grant repository.
    grant_repo: Arc<AccessGrantRepository>,
    /// Access resolver (granting requires edit on the document).
    evaluator: Arc<AccessEvaluator>,
}

impl GrantService {
    /// Creates a new grant service.
    pub fn new(
        doc_repo: Arc<DocumentRepository>,
        grant_repo: Arc<AccessGrantRepository>,
        evaluator: Arc<AccessEvaluator>,
    ) -> Self {
        Self {
            doc_repo,
            grant_repo,
            evaluator,
        }
    }

    /// Grants access on a document. Requires edit access.
    ///
    /// An existing grant for the same principal is replaced rather than
    /// duplicated.
    pub async fn grant(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        req: GrantRequest,
    ) -> AppResult<AccessGrant> {
        let document = self
            .doc_repo
            .find_by_id(document_id)
            .await?
            .filter(|d| d.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Document"))?;
        self.evaluator.require_edit(ctx, &document).await?;

        // Replace rather than stack grants for the same principal.
        let existing = self.grant_repo.find_by_document(document_id).await?;
        for grant in existing.iter().filter(|g| g.principal == req.principal) {
            self.grant_repo.delete(grant.id).await?;
        }

        let grant = AccessGrant {
            id: Uuid::new_v4(),
            document_id,
            principal: req.principal,
            level: req.level,
            granted_by: ctx.user_id,
            created_at: Utc::now(),
        };
        let grant = self.grant_repo.create(&grant).await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            level = %grant.level,
            "Access granted"
        );

        Ok(grant)
    }

    /// Revokes a grant. Requires edit access on the document.
    pub async fn revoke(&self, ctx: &RequestContext, grant_id: Uuid) -> AppResult<()> {
        let grant = self
            .grant_repo
            .find_by_id(grant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Access grant"))?;

        let document = self
            .doc_repo
            .find_by_id(grant.document_id)
            .await?
            .filter(|d| d.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Document"))?;
        self.evaluator.require_edit(ctx, &document).await?;

        self.grant_repo.delete(grant_id).await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %grant.document_id,
            grant_id = %grant_id,
            "Access revoked"
        );

        Ok(())
    }

    /// Lists grants on a document. Requires view access.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> AppResult<Vec<AccessGrant>> {
        let document = self
            .doc_repo
            .find_by_id(document_id)
            .await?
            .filter(|d| d.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Document"))?;
        self.evaluator.require_view(ctx, &document).await?;

        self.grant_repo.find_by_document(document_id).await
    }
}

//! Retention policy assignment and legal hold management.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use docvault_core::clock::Clock;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::document::Document;
use docvault_entity::retention::RetentionPolicy;
use docvault_store::repositories::{DocumentRepository, RetentionPolicyRepository};

use crate::context::RequestContext;

/// Request to create a retention policy.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Validate)]
pub struct CreatePolicyRequest {
    /// Policy name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Retention duration in days.
    #[validate(range(min = 1))]
    pub retention_days: i64,
    /// Optional description.
    pub description: Option<String>,
}

/// Manages retention policies and legal holds.
#[derive(Debug, Clone)]
pub struct RetentionService {
    /// Policy repository.
    policy_repo: Arc<RetentionPolicyRepository>,
    /// Document repository.
    doc_repo: Arc<DocumentRepository>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl RetentionService {
    /// Creates a new retention service.
    pub fn new(
        policy_repo: Arc<RetentionPolicyRepository>,
        doc_repo: Arc<DocumentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            policy_repo,
            doc_repo,
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

    /// Creates a retention policy. Administrators only.
    pub async fn create_policy(
        &self,
        ctx: &RequestContext,
        req: CreatePolicyRequest,
    ) -> AppResult<RetentionPolicy> {
        if !ctx.is_admin() {
            return Err(AppError::access_denied(
                "only administrators manage retention policies",
            ));
        }
        req.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let policy = self
            .policy_repo
            .create(ctx.company_id, &req.name, req.retention_days, req.description)
            .await?;

        info!(
            user_id = %ctx.user_id,
            policy_id = %policy.id,
            retention_days = policy.retention_days,
            "Retention policy created"
        );

        Ok(policy)
    }

    /// Lists the company's retention policies.
    pub async fn list_policies(&self, ctx: &RequestContext) -> AppResult<Vec<RetentionPolicy>> {
        self.policy_repo.list_by_company(ctx.company_id).await
    }

    /// Assigns a retention policy to a document.
    ///
    /// The expiry is computed once here — policy duration added to the
    /// reference date (defaulting to now) — and is not recomputed if the
    /// policy later changes.
    pub async fn apply_policy(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        policy_id: Uuid,
        reference_date: Option<DateTime<Utc>>,
    ) -> AppResult<Document> {
        let policy = self
            .policy_repo
            .find_by_id(policy_id)
            .await?
            .filter(|p| p.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Retention policy"))?;

        self.load(ctx, document_id).await?;

        let reference = reference_date.unwrap_or_else(|| self.clock.now());
        let expires_at = reference + Duration::days(policy.retention_days);

        let document = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                doc.retention_policy_id = Some(policy.id);
                doc.retention_expires_at = Some(expires_at);
                Ok(doc.clone())
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            policy_id = %policy_id,
            expires_at = %expires_at,
            "Retention policy applied"
        );

        Ok(document)
    }

    /// Places or releases a legal hold. Managers and administrators only.
    ///
    /// The hold flag itself is a metadata edit and is never blocked by an
    /// existing hold.
    pub async fn set_legal_hold(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        hold: bool,
    ) -> AppResult<Document> {
        if !ctx.is_manager_or_above() {
            return Err(AppError::access_denied(
                "only management places or releases legal holds",
            ));
        }
        self.load(ctx, document_id).await?;

        let document = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                doc.legal_hold = hold;
                Ok(doc.clone())
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            legal_hold = hold,
            "Legal hold updated"
        );

        Ok(document)
    }
}

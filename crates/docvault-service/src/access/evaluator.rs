//! Effective access resolver.
//!
//! Resolution order:
//! 1. Admin bypass — full access.
//! 2. Owner — `owned_by` / `uploaded_by` always retain at least edit.
//! 3. Explicit per-user grant — wins outright when present.
//! 4. Department grants — most permissive across the user's departments.
//! 5. Manager view bypass — classification never hides a document from
//!    management.
//! 6. Classification default — public/internal grant view, confidential/
//!    restricted require an explicit grant.
//!
//! Legal hold is invisible here: it blocks mutation, never reading. The
//! role bypasses likewise confer no exemption from the checkout or legal
//! hold guards at mutation sites.

use std::sync::Arc;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::access::{Classification, GrantLevel};
use docvault_entity::document::Document;
use docvault_store::repositories::AccessGrantRepository;

use crate::context::RequestContext;

/// Result of resolving effective access.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EffectiveAccess {
    /// Whether any access is granted.
    pub granted: bool,
    /// The resolved permission level (when granted).
    pub level: Option<GrantLevel>,
    /// The rule that decided.
    pub source: AccessSource,
}

/// Where the resolved access came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    /// The user is an admin with full access.
    AdminBypass,
    /// The user owns the document.
    Owner,
    /// An explicit per-user grant.
    UserGrant,
    /// A department grant (most permissive matching).
    DepartmentGrant,
    /// Management role viewing past classification.
    RoleViewBypass,
    /// The classification's default access.
    ClassificationDefault,
    /// No applicable rule granted access.
    Denied,
}

/// Resolves what a principal may do with a document.
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    /// Grant repository.
    grant_repo: Arc<AccessGrantRepository>,
}

impl AccessEvaluator {
    /// Creates a new access evaluator.
    pub fn new(grant_repo: Arc<AccessGrantRepository>) -> Self {
        Self { grant_repo }
    }

    /// Resolve the effective access for the acting principal on a document.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        document: &Document,
    ) -> AppResult<EffectiveAccess> {
        if ctx.is_admin() {
            return Ok(allowed(GrantLevel::Edit, AccessSource::AdminBypass));
        }

        if document.is_owned_by(ctx.user_id) {
            return Ok(allowed(GrantLevel::Edit, AccessSource::Owner));
        }

        let grants = self.grant_repo.find_by_document(document.id).await?;

        if let Some(grant) = grants.iter().find(|g| g.applies_to_user(ctx.user_id)) {
            return Ok(allowed(grant.level, AccessSource::UserGrant));
        }

        let department_level = grants
            .iter()
            .filter(|g| g.applies_to_departments(&ctx.department_ids))
            .map(|g| g.level)
            .max_by_key(|level| level.privilege_level());
        if let Some(level) = department_level {
            return Ok(allowed(level, AccessSource::DepartmentGrant));
        }

        if ctx.is_manager_or_above() {
            return Ok(allowed(GrantLevel::View, AccessSource::RoleViewBypass));
        }

        if !document.classification.requires_explicit_grant() {
            let default_view = match document.classification {
                Classification::Public => true,
                _ => document.company_id == ctx.company_id,
            };
            if default_view {
                return Ok(allowed(
                    GrantLevel::View,
                    AccessSource::ClassificationDefault,
                ));
            }
        }

        Ok(EffectiveAccess {
            granted: false,
            level: None,
            source: AccessSource::Denied,
        })
    }

    /// Resolve and require at least the given level, or fail with
    /// `AccessDenied`.
    pub async fn require(
        &self,
        ctx: &RequestContext,
        document: &Document,
        required: GrantLevel,
    ) -> AppResult<EffectiveAccess> {
        let access = self.resolve(ctx, document).await?;
        match access.level {
            Some(level) if level.has_at_least(required) => Ok(access),
            _ => Err(AppError::access_denied(format!(
                "{} access required on document {}",
                required, document.id
            ))),
        }
    }

    /// Require view access.
    pub async fn require_view(
        &self,
        ctx: &RequestContext,
        document: &Document,
    ) -> AppResult<EffectiveAccess> {
        self.require(ctx, document, GrantLevel::View).await
    }

    /// Require edit access.
    pub async fn require_edit(
        &self,
        ctx: &RequestContext,
        document: &Document,
    ) -> AppResult<EffectiveAccess> {
        self.require(ctx, document, GrantLevel::Edit).await
    }
}

fn allowed(level: GrantLevel, source: AccessSource) -> EffectiveAccess {
    EffectiveAccess {
        granted: true,
        level: Some(level),
        source,
    }
}

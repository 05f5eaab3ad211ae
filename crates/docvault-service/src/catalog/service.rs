//! Document type catalog operations.
//!
//! The catalog is scoped per company through the request context; there is
//! no process-wide catalog state.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::document_type::{CreateDocumentType, DocumentType, DocumentTypePatch};
use docvault_store::repositories::DocumentTypeRepository;

use crate::context::RequestContext;

/// Manages document type configuration.
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// Document type repository.
    type_repo: Arc<DocumentTypeRepository>,
}

/// Request to create a new document type.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Validate)]
pub struct CreateDocumentTypeRequest {
    /// Type code, unique per company (case-insensitive).
    #[validate(length(min = 1, max = 16))]
    pub code: String,
    /// Human-readable name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Allowed file extensions. Empty = unrestricted.
    #[serde(default)]
    pub allowed_extensions: BTreeSet<String>,
    /// Whether documents of this type receive auto-assigned numbers.
    #[serde(default)]
    pub auto_number_enabled: bool,
    /// Number prefix.
    #[serde(default)]
    pub auto_number_prefix: String,
    /// Counter width.
    #[validate(range(min = 1, max = 10))]
    pub auto_number_digits: u8,
    /// Whether the year is embedded in numbers.
    #[serde(default)]
    pub auto_number_includes_year: bool,
    /// Whether new documents start in the approval workflow.
    #[serde(default)]
    pub requires_approval: bool,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(type_repo: Arc<DocumentTypeRepository>) -> Self {
        Self { type_repo }
    }

    /// Creates a new document type.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateDocumentTypeRequest,
    ) -> AppResult<DocumentType> {
        if !ctx.is_admin() {
            return Err(AppError::access_denied(
                "only administrators manage document types",
            ));
        }
        req.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        if req.auto_number_enabled && req.auto_number_prefix.trim().is_empty() {
            return Err(AppError::validation(
                "auto-number prefix is required when numbering is enabled",
            ));
        }

        if let Some(existing) = self
            .type_repo
            .find_by_code(ctx.company_id, &req.code)
            .await?
        {
            return Err(AppError::DuplicateCode {
                code: existing.code,
            });
        }

        let doc_type = self
            .type_repo
            .create(&CreateDocumentType {
                company_id: ctx.company_id,
                code: req.code,
                name: req.name,
                allowed_extensions: req.allowed_extensions,
                auto_number_enabled: req.auto_number_enabled,
                auto_number_prefix: req.auto_number_prefix,
                auto_number_digits: req.auto_number_digits,
                auto_number_includes_year: req.auto_number_includes_year,
                requires_approval: req.requires_approval,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            type_id = %doc_type.id,
            code = %doc_type.code,
            "Document type created"
        );

        Ok(doc_type)
    }

    /// Gets a document type by ID.
    pub async fn get(&self, ctx: &RequestContext, type_id: Uuid) -> AppResult<DocumentType> {
        self.type_repo
            .find_by_id(type_id)
            .await?
            .filter(|t| t.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Document type"))
    }

    /// Gets a document type by code (case-insensitive).
    pub async fn get_by_code(&self, ctx: &RequestContext, code: &str) -> AppResult<DocumentType> {
        self.type_repo
            .find_by_code(ctx.company_id, code)
            .await?
            .ok_or_else(|| AppError::not_found("Document type"))
    }

    /// Lists the company's document types.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<DocumentType>> {
        self.type_repo.list_by_company(ctx.company_id).await
    }

    /// Applies a partial update to a document type.
    ///
    /// Changing `code` is rejected once any document references the type.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        type_id: Uuid,
        patch: DocumentTypePatch,
    ) -> AppResult<DocumentType> {
        if !ctx.is_admin() {
            return Err(AppError::access_denied(
                "only administrators manage document types",
            ));
        }

        let mut doc_type = self.get(ctx, type_id).await?;

        if let Some(code) = &patch.code {
            let code = code.to_uppercase();
            if code != doc_type.code {
                let referencing = self.type_repo.count_documents(type_id).await?;
                if referencing > 0 {
                    return Err(AppError::ImmutableTypeCode {
                        type_id,
                        document_count: referencing,
                    });
                }
                if code.is_empty() || code.len() > 16 {
                    return Err(AppError::validation("code must be 1-16 characters"));
                }
                if let Some(existing) = self.type_repo.find_by_code(ctx.company_id, &code).await? {
                    if existing.id != type_id {
                        return Err(AppError::DuplicateCode {
                            code: existing.code,
                        });
                    }
                }
                doc_type.code = code;
            }
        }
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("name cannot be empty"));
            }
            doc_type.name = name;
        }
        if let Some(extensions) = patch.allowed_extensions {
            doc_type.allowed_extensions =
                extensions.iter().map(|e| e.to_lowercase()).collect();
        }
        if let Some(enabled) = patch.auto_number_enabled {
            doc_type.auto_number_enabled = enabled;
        }
        if let Some(prefix) = patch.auto_number_prefix {
            doc_type.auto_number_prefix = prefix;
        }
        if let Some(digits) = patch.auto_number_digits {
            if !(1..=10).contains(&digits) {
                return Err(AppError::validation("auto-number digits must be 1-10"));
            }
            doc_type.auto_number_digits = digits;
        }
        if let Some(includes_year) = patch.auto_number_includes_year {
            doc_type.auto_number_includes_year = includes_year;
        }
        if let Some(requires_approval) = patch.requires_approval {
            doc_type.requires_approval = requires_approval;
        }
        if let Some(is_active) = patch.is_active {
            doc_type.is_active = is_active;
        }

        let updated = self.type_repo.update(&doc_type).await?;

        info!(
            user_id = %ctx.user_id,
            type_id = %type_id,
            "Document type updated"
        );

        Ok(updated)
    }

    /// Deactivates a document type. Idempotent.
    pub async fn deactivate(&self, ctx: &RequestContext, type_id: Uuid) -> AppResult<DocumentType> {
        if !ctx.is_admin() {
            return Err(AppError::access_denied(
                "only administrators manage document types",
            ));
        }

        let mut doc_type = self.get(ctx, type_id).await?;
        if !doc_type.is_active {
            return Ok(doc_type);
        }
        doc_type.is_active = false;
        let updated = self.type_repo.update(&doc_type).await?;

        info!(user_id = %ctx.user_id, type_id = %type_id, "Document type deactivated");

        Ok(updated)
    }
}

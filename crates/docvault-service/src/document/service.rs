//! Document CRUD with numbering, access, checkout, and policy enforcement.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use docvault_core::clock::Clock;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_entity::access::{AccessLevel, Classification};
use docvault_entity::document::{CheckoutState, ContentDescriptor, Document, DocumentVersion};
use docvault_entity::workflow::DocumentStatus;
use docvault_store::repositories::{
    AccessGrantRepository, DocumentRepository, DocumentTypeRepository, FolderRepository,
};

use crate::access::AccessEvaluator;
use crate::context::RequestContext;
use crate::numbering::NumberingService;
use crate::retention;

/// Request to create a new document.
///
/// The content descriptor comes from the external blob storage service; the
/// core never sees file bytes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Validate)]
pub struct CreateDocumentRequest {
    /// The folder to place the document in.
    pub folder_id: Uuid,
    /// Document name, including extension.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// The document type.
    pub document_type_id: Uuid,
    /// Blob storage descriptor of the uploaded content.
    pub content: ContentDescriptor,
    /// Confidentiality label.
    pub classification: Classification,
    /// Free-form category.
    pub category: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// When the type does not require approval, start at `Published`
    /// instead of `Approved`.
    #[serde(default)]
    pub publish_immediately: bool,
}

/// Metadata-only update. All fields optional; `None` leaves the current
/// value. These edits remain allowed under legal hold.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateMetadataRequest {
    /// New name.
    pub name: Option<String>,
    /// New category (`Some(None)` clears it).
    pub category: Option<Option<String>>,
    /// New tag set.
    pub tags: Option<BTreeSet<String>>,
    /// New classification label.
    pub classification: Option<Classification>,
    /// New review date.
    pub review_date: Option<chrono::DateTime<chrono::Utc>>,
    /// New review cadence in days.
    pub review_frequency_days: Option<i32>,
}

/// Manages document metadata records.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document repository.
    doc_repo: Arc<DocumentRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Document type repository.
    type_repo: Arc<DocumentTypeRepository>,
    /// Grant repository (grants die with their document).
    grant_repo: Arc<AccessGrantRepository>,
    /// Access resolver.
    evaluator: Arc<AccessEvaluator>,
    /// Number allocator.
    numbering: Arc<NumberingService>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        doc_repo: Arc<DocumentRepository>,
        folder_repo: Arc<FolderRepository>,
        type_repo: Arc<DocumentTypeRepository>,
        grant_repo: Arc<AccessGrantRepository>,
        evaluator: Arc<AccessEvaluator>,
        numbering: Arc<NumberingService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            doc_repo,
            folder_repo,
            type_repo,
            grant_repo,
            evaluator,
            numbering,
            clock,
        }
    }

    /// Creates a new document.
    ///
    /// Validates folder and type, checks the extension against the type,
    /// assigns a document number when the type numbers automatically, and
    /// picks the initial workflow state from the type's approval rule.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateDocumentRequest,
    ) -> AppResult<Document> {
        req.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let folder = self
            .folder_repo
            .find_by_id(req.folder_id)
            .await?
            .filter(|f| f.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Folder"))?;

        let doc_type = self
            .type_repo
            .find_by_id(req.document_type_id)
            .await?
            .filter(|t| t.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Document type"))?;
        if !doc_type.is_active {
            return Err(AppError::validation(format!(
                "document type '{}' is inactive",
                doc_type.code
            )));
        }

        let extension = extension_of(&req.name);
        match &extension {
            Some(ext) if !doc_type.extension_allowed(ext) => {
                return Err(AppError::validation(format!(
                    "extension '.{ext}' is not allowed for type '{}'",
                    doc_type.code
                )));
            }
            None if !doc_type.allowed_extensions.is_empty() => {
                return Err(AppError::validation(format!(
                    "type '{}' requires one of its allowed extensions",
                    doc_type.code
                )));
            }
            _ => {}
        }

        let now = self.clock.now();
        // Number allocation and record insertion form one unit: the counter
        // only moves forward, so a number handed out here is never reissued
        // even if a later step fails.
        let document_number = self.numbering.allocate(&doc_type, now).await?;

        let status = if doc_type.requires_approval {
            DocumentStatus::Draft
        } else if req.publish_immediately {
            DocumentStatus::Published
        } else {
            DocumentStatus::Approved
        };

        let document = Document {
            id: Uuid::new_v4(),
            company_id: ctx.company_id,
            folder_id: folder.id,
            name: req.name,
            document_number,
            document_type_id: doc_type.id,
            file_type: extension.unwrap_or_default(),
            file_size_bytes: req.content.file_size_bytes,
            content_hash: req.content.content_hash,
            storage_path: req.content.storage_path,
            version: 1,
            status,
            classification: req.classification,
            access_level: legacy_access_level(req.classification),
            category: req.category,
            tags: req.tags,
            owned_by_user_id: ctx.user_id,
            uploaded_by_user_id: ctx.user_id,
            is_checked_out: false,
            checked_out_by_user_id: None,
            checked_out_at: None,
            check_out_expires_at: None,
            checkout_grace_user_id: None,
            legal_hold: false,
            retention_policy_id: None,
            retention_expires_at: None,
            review_date: None,
            review_frequency_days: None,
            last_reviewed_at: None,
            last_reviewed_by: None,
            approved_by_user_id: None,
            approved_at: None,
            approval_notes: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let document = self.doc_repo.create(&document).await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            document_number = ?document.document_number,
            folder_id = %folder.id,
            "Document created"
        );

        Ok(document)
    }

    /// Gets a document by ID. Requires view access; checkout and legal hold
    /// never block reading.
    pub async fn get(&self, ctx: &RequestContext, document_id: Uuid) -> AppResult<Document> {
        let document = self
            .doc_repo
            .find_by_id(document_id)
            .await?
            .filter(|d| d.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Document"))?;
        self.evaluator.require_view(ctx, &document).await?;
        Ok(document)
    }

    /// Lists documents in a folder, restricted to what the caller may view.
    ///
    /// Documents whose classification requires a grant the caller does not
    /// hold are absent from the page, not blanked; totals count visible
    /// documents only.
    pub async fn list_by_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .filter(|f| f.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Folder"))?;

        let mut visible = Vec::new();
        for document in self.doc_repo.find_by_folder(folder_id).await? {
            if self.evaluator.resolve(ctx, &document).await?.granted {
                visible.push(document);
            }
        }

        let total = visible.len() as u64;
        let items = visible
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// Lists a document's version history. Requires view access.
    pub async fn list_versions(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> AppResult<Vec<DocumentVersion>> {
        self.get(ctx, document_id).await?;
        self.doc_repo.find_versions(document_id).await
    }

    /// Applies a metadata-only update.
    ///
    /// Permitted under legal hold; blocked while another user holds an
    /// unexpired checkout (mutations belong to the lock holder).
    pub async fn update_metadata(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        req: UpdateMetadataRequest,
    ) -> AppResult<Document> {
        let document = self.get(ctx, document_id).await?;
        self.evaluator.require_edit(ctx, &document).await?;

        let now = self.clock.now();
        let doc_type = self
            .type_repo
            .find_by_id(document.document_type_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document type"))?;

        let updated = self
            .doc_repo
            .with_document_mut(document_id, |doc| {
                ensure_not_locked_by_other(doc, ctx.user_id, now)?;

                if let Some(name) = &req.name {
                    if name.trim().is_empty() {
                        return Err(AppError::validation("name cannot be empty"));
                    }
                    if let Some(ext) = extension_of(name) {
                        if !doc_type.extension_allowed(&ext) {
                            return Err(AppError::validation(format!(
                                "extension '.{ext}' is not allowed for type '{}'",
                                doc_type.code
                            )));
                        }
                        doc.file_type = ext;
                    }
                    doc.name = name.clone();
                }
                if let Some(category) = &req.category {
                    doc.category = category.clone();
                }
                if let Some(tags) = &req.tags {
                    doc.tags = tags.clone();
                }
                if let Some(classification) = req.classification {
                    doc.classification = classification;
                    doc.access_level = legacy_access_level(classification);
                }
                if let Some(review_date) = req.review_date {
                    doc.review_date = Some(review_date);
                }
                if let Some(days) = req.review_frequency_days {
                    doc.review_frequency_days = Some(days);
                }
                Ok(doc.clone())
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            "Document metadata updated"
        );

        Ok(updated)
    }

    /// Soft-deletes a document, destroying its grants.
    ///
    /// Rejected while legally held, while retained (unless the caller
    /// supplies the administrative override), or while checked out by
    /// another user.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
        override_retention: bool,
    ) -> AppResult<()> {
        let document = self.get(ctx, document_id).await?;
        self.evaluator.require_edit(ctx, &document).await?;

        let now = self.clock.now();
        self.doc_repo
            .with_document_mut(document_id, |doc| {
                ensure_not_locked_by_other(doc, ctx.user_id, now)?;
                retention::ensure_deletable(doc, now, override_retention)?;
                doc.deleted_at = Some(now);
                Ok(())
            })
            .await?;
        self.grant_repo.delete_by_document(document_id).await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            override_retention,
            "Document deleted"
        );

        Ok(())
    }
}

/// Reject mutation while another user holds an unexpired lock.
pub(crate) fn ensure_not_locked_by_other(
    doc: &Document,
    user_id: Uuid,
    now: chrono::DateTime<chrono::Utc>,
) -> AppResult<()> {
    match doc.checkout_state() {
        CheckoutState::CheckedOut { by, expires_at, .. } if by != user_id && expires_at > now => {
            Err(AppError::AlreadyCheckedOut {
                holder: by,
                expires_at,
            })
        }
        _ => Ok(()),
    }
}

fn extension_of(name: &str) -> Option<String> {
    name.rsplit('.')
        .next()
        .filter(|ext| *ext != name && !ext.is_empty())
        .map(|ext| ext.to_lowercase())
}

fn legacy_access_level(classification: Classification) -> AccessLevel {
    match classification {
        Classification::Public => AccessLevel::Public,
        Classification::Internal => AccessLevel::Private,
        Classification::Confidential | Classification::Restricted => AccessLevel::Restricted,
    }
}

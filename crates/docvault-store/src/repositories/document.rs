//! Document repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::document::{Document, DocumentVersion};

use crate::store::Store;

/// Repository for document metadata records and version history.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    store: Arc<Store>,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Find a live (non-deleted) document by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self
            .store
            .documents
            .get(&id)
            .filter(|d| !d.is_deleted())
            .map(|d| d.clone()))
    }

    /// List live documents in a folder, newest first.
    pub async fn find_by_folder(&self, folder_id: Uuid) -> AppResult<Vec<Document>> {
        let mut documents: Vec<Document> = self
            .store
            .documents
            .iter()
            .filter(|d| d.folder_id == folder_id && !d.is_deleted())
            .map(|d| d.clone())
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(documents)
    }

    /// Insert a new document record.
    pub async fn create(&self, document: &Document) -> AppResult<Document> {
        self.store.documents.insert(document.id, document.clone());
        Ok(document.clone())
    }

    /// Mutate a live document under its exclusive entry lock.
    ///
    /// The closure observes the current record and applies its change as one
    /// atomic check-then-act step; no other writer can interleave. Checkout
    /// acquisition and release go through here.
    pub async fn with_document_mut<R, F>(&self, id: Uuid, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Document) -> AppResult<R>,
    {
        let mut entry = self
            .store
            .documents
            .get_mut(&id)
            .filter(|d| !d.is_deleted())
            .ok_or_else(|| AppError::not_found("Document"))?;
        let result = f(&mut entry)?;
        entry.updated_at = Utc::now();
        Ok(result)
    }

    /// Append a version history record.
    pub async fn create_version(&self, version: &DocumentVersion) -> AppResult<()> {
        self.store
            .versions
            .entry(version.document_id)
            .or_default()
            .push(version.clone());
        Ok(())
    }

    /// List a document's version history, oldest first.
    pub async fn find_versions(&self, document_id: Uuid) -> AppResult<Vec<DocumentVersion>> {
        let mut versions = self
            .store
            .versions
            .get(&document_id)
            .map(|v| v.clone())
            .unwrap_or_default();
        versions.sort_by_key(|v| v.version_number);
        Ok(versions)
    }
}

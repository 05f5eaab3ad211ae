//! Document type repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::document_type::{CreateDocumentType, DocumentType};

use crate::store::Store;

/// Repository for document type records.
#[derive(Debug, Clone)]
pub struct DocumentTypeRepository {
    store: Arc<Store>,
}

impl DocumentTypeRepository {
    /// Create a new document type repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Find a type by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DocumentType>> {
        Ok(self.store.document_types.get(&id).map(|r| r.clone()))
    }

    /// Find a type by company and code (case-insensitive).
    pub async fn find_by_code(&self, company_id: Uuid, code: &str) -> AppResult<Option<DocumentType>> {
        let code = code.to_uppercase();
        Ok(self
            .store
            .document_types
            .iter()
            .find(|r| r.company_id == company_id && r.code == code)
            .map(|r| r.clone()))
    }

    /// List all types for a company, ordered by code.
    pub async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<DocumentType>> {
        let mut types: Vec<DocumentType> = self
            .store
            .document_types
            .iter()
            .filter(|r| r.company_id == company_id)
            .map(|r| r.clone())
            .collect();
        types.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(types)
    }

    /// Insert a new type record. The code is stored uppercase.
    pub async fn create(&self, record: &CreateDocumentType) -> AppResult<DocumentType> {
        let now = Utc::now();
        let doc_type = DocumentType {
            id: Uuid::new_v4(),
            company_id: record.company_id,
            code: record.code.to_uppercase(),
            name: record.name.clone(),
            allowed_extensions: record
                .allowed_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            auto_number_enabled: record.auto_number_enabled,
            auto_number_prefix: record.auto_number_prefix.clone(),
            auto_number_digits: record.auto_number_digits,
            auto_number_includes_year: record.auto_number_includes_year,
            requires_approval: record.requires_approval,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.store
            .document_types
            .insert(doc_type.id, doc_type.clone());
        Ok(doc_type)
    }

    /// Replace an existing type record.
    pub async fn update(&self, doc_type: &DocumentType) -> AppResult<DocumentType> {
        let mut entry = self
            .store
            .document_types
            .get_mut(&doc_type.id)
            .ok_or_else(|| AppError::not_found("Document type"))?;
        let mut updated = doc_type.clone();
        updated.updated_at = Utc::now();
        *entry = updated.clone();
        Ok(updated)
    }

    /// Count live (non-deleted) documents referencing a type.
    pub async fn count_documents(&self, type_id: Uuid) -> AppResult<u64> {
        Ok(self
            .store
            .documents
            .iter()
            .filter(|d| d.document_type_id == type_id && !d.is_deleted())
            .count() as u64)
    }
}

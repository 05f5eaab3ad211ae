//! Folder repository: arena CRUD and subtree operations.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::document::Document;
use docvault_entity::folder::{CreateFolder, Folder};

use crate::store::Store;

/// Counts of what a cascade removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtreeRemoval {
    /// Folders removed (including the root of the cascade).
    pub folders: u64,
    /// Documents removed.
    pub documents: u64,
}

/// Repository for folder records and tree walks.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    store: Arc<Store>,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.store.folders.get(&id).map(|r| r.clone()))
    }

    /// Find a folder by company and materialized path.
    pub async fn find_by_path(&self, company_id: Uuid, path: &str) -> AppResult<Option<Folder>> {
        Ok(self
            .store
            .folders
            .iter()
            .find(|f| f.company_id == company_id && f.path == path)
            .map(|f| f.clone()))
    }

    /// List root folders for a company, ordered by name.
    pub async fn find_roots(&self, company_id: Uuid) -> AppResult<Vec<Folder>> {
        let mut roots: Vec<Folder> = self
            .store
            .folders
            .iter()
            .filter(|f| f.company_id == company_id && f.parent_id.is_none())
            .map(|f| f.clone())
            .collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roots)
    }

    /// List direct children of a folder, ordered by name.
    pub async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
        let mut children: Vec<Folder> = self
            .store
            .folders
            .iter()
            .filter(|f| f.parent_id == Some(parent_id))
            .map(|f| f.clone())
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    /// Count direct child folders.
    pub async fn count_children(&self, parent_id: Uuid) -> AppResult<u64> {
        Ok(self
            .store
            .folders
            .iter()
            .filter(|f| f.parent_id == Some(parent_id))
            .count() as u64)
    }

    /// Count live documents directly in a folder.
    pub async fn count_documents(&self, folder_id: Uuid) -> AppResult<u64> {
        Ok(self
            .store
            .documents
            .iter()
            .filter(|d| d.folder_id == folder_id && !d.is_deleted())
            .count() as u64)
    }

    /// Insert a new folder record.
    pub async fn create(&self, record: &CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            company_id: record.company_id,
            parent_id: record.parent_id,
            name: record.name.clone(),
            path: record.path.clone(),
            depth: record.depth,
            created_by: record.created_by,
            created_at: now,
            updated_at: now,
        };
        self.store.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    /// Remove a single empty folder.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.store.folders.remove(&id).is_some())
    }

    /// Collect every folder id in the subtree rooted at `folder_id`,
    /// iteratively (the root comes first).
    fn collect_subtree_folders(&self, folder_id: Uuid) -> Vec<Uuid> {
        let mut result = vec![folder_id];
        let mut frontier = vec![folder_id];
        while let Some(current) = frontier.pop() {
            for entry in self.store.folders.iter() {
                if entry.parent_id == Some(current) {
                    result.push(entry.id);
                    frontier.push(entry.id);
                }
            }
        }
        result
    }

    /// Delete a folder subtree, all-or-nothing.
    ///
    /// Runs under the store's structural mutex. Every live document in the
    /// subtree is passed to `guard` first; if any is rejected the whole
    /// cascade fails and nothing is removed. Document version history and
    /// grants are destroyed with their documents.
    pub async fn delete_subtree<F>(&self, folder_id: Uuid, guard: F) -> AppResult<SubtreeRemoval>
    where
        F: Fn(&Document) -> AppResult<()>,
    {
        let _serialized = self
            .store
            .structural
            .lock()
            .map_err(|_| AppError::internal("structural lock poisoned"))?;

        if !self.store.folders.contains_key(&folder_id) {
            return Err(AppError::not_found("Folder"));
        }

        let folder_ids = self.collect_subtree_folders(folder_id);

        let document_ids: Vec<Uuid> = self
            .store
            .documents
            .iter()
            .filter(|d| folder_ids.contains(&d.folder_id) && !d.is_deleted())
            .map(|d| d.id)
            .collect();

        // Validation phase: any rejection aborts before anything is touched.
        for doc_id in &document_ids {
            if let Some(doc) = self.store.documents.get(doc_id) {
                guard(&doc)?;
            }
        }

        // Apply phase.
        for doc_id in &document_ids {
            self.store.documents.remove(doc_id);
            self.store.versions.remove(doc_id);
        }
        let grant_ids: Vec<Uuid> = self
            .store
            .grants
            .iter()
            .filter(|g| document_ids.contains(&g.document_id))
            .map(|g| g.id)
            .collect();
        for grant_id in grant_ids {
            self.store.grants.remove(&grant_id);
        }
        for fid in &folder_ids {
            self.store.folders.remove(fid);
        }

        Ok(SubtreeRemoval {
            folders: folder_ids.len() as u64,
            documents: document_ids.len() as u64,
        })
    }
}

//! Access grant repository.

use std::sync::Arc;

use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::access::AccessGrant;

use crate::store::Store;

/// Repository for explicit access grants.
#[derive(Debug, Clone)]
pub struct AccessGrantRepository {
    store: Arc<Store>,
}

impl AccessGrantRepository {
    /// Create a new access grant repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Find a grant by id.
    pub async fn find_by_id(&self, grant_id: Uuid) -> AppResult<Option<AccessGrant>> {
        Ok(self.store.grants.get(&grant_id).map(|g| g.clone()))
    }

    /// Insert a grant.
    pub async fn create(&self, grant: &AccessGrant) -> AppResult<AccessGrant> {
        self.store.grants.insert(grant.id, grant.clone());
        Ok(grant.clone())
    }

    /// Remove a grant by id. Returns `true` if it existed.
    pub async fn delete(&self, grant_id: Uuid) -> AppResult<bool> {
        Ok(self.store.grants.remove(&grant_id).is_some())
    }

    /// List all grants on a document.
    pub async fn find_by_document(&self, document_id: Uuid) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .store
            .grants
            .iter()
            .filter(|g| g.document_id == document_id)
            .map(|g| g.clone())
            .collect())
    }

    /// Destroy all grants on a document (document deletion).
    pub async fn delete_by_document(&self, document_id: Uuid) -> AppResult<u64> {
        let ids: Vec<Uuid> = self
            .store
            .grants
            .iter()
            .filter(|g| g.document_id == document_id)
            .map(|g| g.id)
            .collect();
        for id in &ids {
            self.store.grants.remove(id);
        }
        Ok(ids.len() as u64)
    }
}

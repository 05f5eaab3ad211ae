//! Retention policy repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::retention::RetentionPolicy;

use crate::store::Store;

/// Repository for retention policy records.
#[derive(Debug, Clone)]
pub struct RetentionPolicyRepository {
    store: Arc<Store>,
}

impl RetentionPolicyRepository {
    /// Create a new retention policy repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Find a policy by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RetentionPolicy>> {
        Ok(self.store.retention_policies.get(&id).map(|p| p.clone()))
    }

    /// List policies for a company, ordered by name.
    pub async fn list_by_company(&self, company_id: Uuid) -> AppResult<Vec<RetentionPolicy>> {
        let mut policies: Vec<RetentionPolicy> = self
            .store
            .retention_policies
            .iter()
            .filter(|p| p.company_id == company_id)
            .map(|p| p.clone())
            .collect();
        policies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(policies)
    }

    /// Insert a new policy.
    pub async fn create(
        &self,
        company_id: Uuid,
        name: &str,
        retention_days: i64,
        description: Option<String>,
    ) -> AppResult<RetentionPolicy> {
        let policy = RetentionPolicy {
            id: Uuid::new_v4(),
            company_id,
            name: name.to_string(),
            retention_days,
            description,
            created_at: Utc::now(),
        };
        self.store
            .retention_policies
            .insert(policy.id, policy.clone());
        Ok(policy)
    }
}

//! Folder CRUD and cascading deletion.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use docvault_core::clock::Clock;
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::folder::{CreateFolder, Folder};
use docvault_store::repositories::FolderRepository;

use crate::context::RequestContext;
use crate::retention;

/// Request to create a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<Uuid>,
}

/// Manages the folder hierarchy.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Time source for retention checks during cascades.
    clock: Arc<dyn Clock>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { folder_repo, clock }
    }

    /// Gets a folder by ID.
    pub async fn get(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .filter(|f| f.company_id == ctx.company_id)
            .ok_or_else(|| AppError::not_found("Folder"))
    }

    /// Lists root folders for the company.
    pub async fn list_roots(&self, ctx: &RequestContext) -> AppResult<Vec<Folder>> {
        self.folder_repo.find_roots(ctx.company_id).await
    }

    /// Lists direct children of a folder.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<Vec<Folder>> {
        self.get(ctx, folder_id).await?;
        self.folder_repo.find_children(folder_id).await
    }

    /// Creates a new folder.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        req.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if req.name.contains('/') {
            return Err(AppError::validation("Folder name cannot contain '/'"));
        }

        let (path, depth) = match req.parent_id {
            Some(parent_id) => {
                let parent = self
                    .folder_repo
                    .find_by_id(parent_id)
                    .await?
                    .filter(|f| f.company_id == ctx.company_id)
                    .ok_or(AppError::ParentNotFound(parent_id))?;
                (format!("{}/{}", parent.path, req.name), parent.depth + 1)
            }
            None => (format!("/{}", req.name), 0),
        };

        if self
            .folder_repo
            .find_by_path(ctx.company_id, &path)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "A folder at path '{path}' already exists"
            )));
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                company_id: ctx.company_id,
                parent_id: req.parent_id,
                name: req.name,
                path,
                depth,
                created_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );

        Ok(folder)
    }

    /// Deletes a folder.
    ///
    /// Without `cascade`, a folder holding any child folder or document is
    /// rejected with `FolderNotEmpty`. With `cascade`, the entire subtree is
    /// removed all-or-nothing: a single legally-held document anywhere in it
    /// aborts the cascade and nothing changes. `override_retention` extends
    /// the administrative retention override to every document in the
    /// subtree; it never overrides a legal hold.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        cascade: bool,
        override_retention: bool,
    ) -> AppResult<()> {
        let folder = self.get(ctx, folder_id).await?;

        if !cascade {
            let child_folders = self.folder_repo.count_children(folder_id).await?;
            let documents = self.folder_repo.count_documents(folder_id).await?;
            if child_folders > 0 || documents > 0 {
                return Err(AppError::FolderNotEmpty {
                    child_folders,
                    documents,
                });
            }
            self.folder_repo.delete(folder_id).await?;

            info!(
                user_id = %ctx.user_id,
                folder_id = %folder_id,
                path = %folder.path,
                "Folder deleted"
            );
            return Ok(());
        }

        let now = self.clock.now();
        let removal = self
            .folder_repo
            .delete_subtree(folder_id, |doc| {
                retention::ensure_deletable(doc, now, override_retention)
            })
            .await
            .inspect_err(|e| {
                warn!(
                    user_id = %ctx.user_id,
                    folder_id = %folder_id,
                    error = %e,
                    "Cascade delete aborted"
                );
            })?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            path = %folder.path,
            folders_removed = removal.folders,
            documents_removed = removal.documents,
            "Folder subtree deleted"
        );

        Ok(())
    }
}

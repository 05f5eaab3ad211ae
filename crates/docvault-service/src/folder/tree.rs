//! Folder tree assembly for hierarchical display.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::folder::{Folder, FolderNode, FolderTree};
use docvault_store::repositories::FolderRepository;

use crate::context::RequestContext;

/// Builds display trees from the folder arena.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
}

impl TreeBuilder {
    /// Creates a new tree builder.
    pub fn new(folder_repo: Arc<FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// Builds the folder tree for the company, rooted at `root_id` when
    /// given, else spanning all root folders.
    pub async fn build(
        &self,
        ctx: &RequestContext,
        root_id: Option<Uuid>,
    ) -> AppResult<FolderTree> {
        let roots = match root_id {
            Some(id) => match self.folder_repo.find_by_id(id).await? {
                Some(folder) if folder.company_id == ctx.company_id => vec![folder],
                _ => return Ok(FolderTree::empty()),
            },
            None => self.folder_repo.find_roots(ctx.company_id).await?,
        };

        let mut total_folders = 0;
        let mut total_documents = 0;
        let mut nodes = Vec::with_capacity(roots.len());
        for root in roots {
            let node = self.build_node(&root).await?;
            total_folders += count_folders(&node);
            total_documents += count_documents(&node);
            nodes.push(node);
        }

        Ok(FolderTree {
            roots: nodes,
            total_folders,
            total_documents,
        })
    }

    /// Builds the subtree under one folder, iteratively: children are
    /// collected level by level, then stitched bottom-up.
    async fn build_node(&self, root: &Folder) -> AppResult<FolderNode> {
        // Collect the whole subtree breadth-first.
        let mut folders: Vec<Folder> = vec![root.clone()];
        let mut cursor = 0;
        while cursor < folders.len() {
            let children = self.folder_repo.find_children(folders[cursor].id).await?;
            folders.extend(children);
            cursor += 1;
        }

        let mut nodes: HashMap<Uuid, FolderNode> = HashMap::with_capacity(folders.len());
        for folder in &folders {
            nodes.insert(
                folder.id,
                FolderNode {
                    id: folder.id,
                    name: folder.name.clone(),
                    path: folder.path.clone(),
                    depth: folder.depth,
                    document_count: self.folder_repo.count_documents(folder.id).await?,
                    children: Vec::new(),
                },
            );
        }

        // Stitch children into parents, deepest first so each node is
        // complete before it is attached.
        for folder in folders.iter().skip(1).rev() {
            if let Some(parent_id) = folder.parent_id {
                if let Some(node) = nodes.remove(&folder.id) {
                    if let Some(parent) = nodes.get_mut(&parent_id) {
                        parent.children.push(node);
                    }
                }
            }
        }

        let mut root_node = nodes
            .remove(&root.id)
            .ok_or_else(|| AppError::internal("tree root vanished during assembly"))?;
        sort_children(&mut root_node);
        Ok(root_node)
    }
}

fn sort_children(node: &mut FolderNode) {
    node.children.sort_by(|a, b| a.name.cmp(&b.name));
    for child in &mut node.children {
        sort_children(child);
    }
}

fn count_folders(node: &FolderNode) -> u64 {
    1 + node.children.iter().map(count_folders).sum::<u64>()
}

fn count_documents(node: &FolderNode) -> u64 {
    node.document_count + node.children.iter().map(count_documents).sum::<u64>()
}

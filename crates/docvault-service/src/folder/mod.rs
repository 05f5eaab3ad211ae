//! Folder hierarchy operations.

pub mod service;
pub mod tree;

pub use service::{CreateFolderRequest, FolderService};
pub use tree::TreeBuilder;

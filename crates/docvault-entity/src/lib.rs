//! # docvault-entity
//!
//! Domain entity definitions for DocVault: folders, documents, document
//! types, access grants, retention policies, and the workflow/checkout
//! state machines. Entities are plain serializable records; business rules
//! that span entities live in `docvault-service`.

pub mod access;
pub mod document;
pub mod document_type;
pub mod folder;
pub mod principal;
pub mod retention;
pub mod workflow;

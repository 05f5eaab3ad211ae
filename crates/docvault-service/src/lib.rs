//! # docvault-service
//!
//! Business services for the DocVault document-control core. Each service
//! takes a [`context::RequestContext`] identifying the acting principal and
//! enforces the domain rules before touching the store: access resolution,
//! checkout locking, retention/legal hold, and workflow legality.

pub mod access;
pub mod catalog;
pub mod context;
pub mod document;
pub mod folder;
pub mod numbering;
pub mod retention;
pub mod workflow;

pub use context::RequestContext;

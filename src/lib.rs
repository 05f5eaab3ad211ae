//! DocVault — document-control domain core.
//!
//! A facade over the workspace crates: folder hierarchy, versioned document
//! metadata, per-type auto-numbering, checkout locking, classification-based
//! access, retention/legal hold, and the approval workflow. Transport,
//! rendering, authentication, and blob byte I/O live outside this core.

pub use docvault_core::config::AppConfig;
pub use docvault_core::{AppError, AppResult, Clock, SystemClock};
pub use docvault_entity as entity;
pub use docvault_service as service;
pub use docvault_store as store;

//! Retention policies and legal hold.

pub mod guard;
pub mod service;

pub use guard::{ensure_content_mutable, ensure_deletable};
pub use service::{CreatePolicyRequest, RetentionService};

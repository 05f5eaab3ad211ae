//! Access control: effective permission resolution and grant management.

pub mod evaluator;
pub mod service;

pub use evaluator::{AccessEvaluator, AccessSource, EffectiveAccess};
pub use service::{GrantRequest, GrantService};

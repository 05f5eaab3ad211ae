//! # docvault-core
//!
//! Core crate for DocVault. Contains the unified error system, configuration
//! schemas, the clock abstraction, and pagination types.
//!
//! This crate has **no** internal dependencies on other DocVault crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use error::AppError;
pub use result::AppResult;

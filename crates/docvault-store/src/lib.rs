//! # docvault-store
//!
//! In-memory record store and per-entity repositories for DocVault.
//!
//! The store provides the two serializing primitives the domain requires:
//! atomic per-scope sequence counters for document numbering, and exclusive
//! per-record mutation for checkout check-then-act. Composite structural
//! mutations (cascading folder deletion) are serialized through a
//! store-level mutex so they are all-or-nothing.

pub mod repositories;
pub mod store;

pub use store::{SequenceScope, Store};

//! Monotonic sequence counters for document numbering.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use docvault_core::AppResult;

use crate::store::{SequenceScope, Store};

/// Allocates document numbers with exclusive increment per scope.
///
/// Allocation is a single `fetch_add` on the scope's counter, so two
/// concurrent allocations under the same scope can never observe the same
/// value. Counters only move forward; there is no read-then-write of a
/// stored "last number".
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    store: Arc<Store>,
}

impl SequenceRepository {
    /// Create a new sequence repository.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Allocate the next number in the scope, starting from 1.
    pub async fn next(&self, scope: SequenceScope) -> AppResult<i64> {
        let counter = self
            .store
            .sequences
            .entry(scope)
            .or_insert_with(|| AtomicI64::new(0));
        Ok(counter.value().fetch_add(1, Ordering::SeqCst) + 1)
    }
}

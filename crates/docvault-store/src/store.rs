//! The shared in-memory record store.

use std::sync::Mutex;
use std::sync::atomic::AtomicI64;

use dashmap::DashMap;
use uuid::Uuid;

use docvault_entity::access::AccessGrant;
use docvault_entity::document::{Document, DocumentVersion};
use docvault_entity::document_type::DocumentType;
use docvault_entity::folder::Folder;
use docvault_entity::retention::RetentionPolicy;

/// Scope of a document-number counter.
///
/// When the type embeds the year, each `(type, year)` pair runs its own
/// counter; otherwise the counter is per type alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceScope {
    /// The document type owning the counter.
    pub document_type_id: Uuid,
    /// The calendar year, when the numbering rule embeds it.
    pub year: Option<i32>,
}

/// Shared record store backing all repositories.
///
/// Each entity lives in its own keyed arena. Counters are monotonic and
/// never reset; a consumed number is never reissued even if the document
/// that consumed it is deleted.
#[derive(Debug, Default)]
pub struct Store {
    /// Folder records by id.
    pub(crate) folders: DashMap<Uuid, Folder>,
    /// Document records by id (soft-deleted records included).
    pub(crate) documents: DashMap<Uuid, Document>,
    /// Version history per document id.
    pub(crate) versions: DashMap<Uuid, Vec<DocumentVersion>>,
    /// Document type records by id.
    pub(crate) document_types: DashMap<Uuid, DocumentType>,
    /// Access grants by grant id.
    pub(crate) grants: DashMap<Uuid, AccessGrant>,
    /// Retention policies by id.
    pub(crate) retention_policies: DashMap<Uuid, RetentionPolicy>,
    /// Monotonic number counters per scope.
    pub(crate) sequences: DashMap<SequenceScope, AtomicI64>,
    /// Serializes composite structural mutations (cascade deletes) so they
    /// observe and apply a consistent snapshot of the tree.
    pub(crate) structural: Mutex<()>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

//! Per-entity repositories over the shared store.

pub mod access;
pub mod document;
pub mod document_type;
pub mod folder;
pub mod retention;
pub mod sequence;

pub use access::AccessGrantRepository;
pub use document::DocumentRepository;
pub use document_type::DocumentTypeRepository;
pub use folder::FolderRepository;
pub use retention::RetentionPolicyRepository;
pub use sequence::SequenceRepository;

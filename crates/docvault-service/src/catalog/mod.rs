//! Document type catalog.

pub mod service;

pub use service::{CatalogService, CreateDocumentTypeRequest};

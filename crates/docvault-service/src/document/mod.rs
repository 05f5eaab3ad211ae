//! Document store operations and checkout locking.

pub mod checkout;
pub mod service;

pub use checkout::CheckoutService;
pub use service::{CreateDocumentRequest, DocumentService, UpdateMetadataRequest};

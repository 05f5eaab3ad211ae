//! Document entities.

pub mod checkout;
pub mod model;
pub mod version;

pub use checkout::{CheckinOutcome, CheckoutState};
pub use model::{ContentDescriptor, Document};
pub use version::DocumentVersion;

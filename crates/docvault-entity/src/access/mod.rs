//! Access control entities: classification labels and explicit grants.

pub mod classification;
pub mod grant;

pub use classification::{AccessLevel, Classification};
pub use grant::{AccessGrant, GrantLevel, GrantPrincipal};

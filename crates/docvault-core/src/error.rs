//! Unified application error types for DocVault.
//!
//! All crates map their failures into [`AppError`] for consistent
//! propagation through the ? operator. Domain rejections that a caller can
//! act on carry their resolution context as variant fields (current lock
//! holder, colliding code, retention expiry) rather than burying it in a
//! message string.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Top-level error categorization used across the entire application.
///
/// Categories follow how a caller should react: `Validation` means fix the
/// input and resend, `Conflict` means the resource exists but is busy or
/// colliding, `Policy` means the operation is forbidden by a governance rule
/// and retrying will not help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested record was not found.
    NotFound,
    /// Input validation failed before any state change.
    Validation,
    /// The operation collided with existing state (lock held, duplicate code).
    Conflict,
    /// A governance rule (legal hold, retention, workflow) rejected the operation.
    Policy,
    /// The caller is not authorized to perform the action.
    Authorization,
    /// An internal error occurred.
    Internal,
    /// A configuration error occurred.
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Policy => write!(f, "POLICY"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Configuration => write!(f, "CONFIGURATION"),
        }
    }
}

/// The unified application error used throughout DocVault.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum AppError {
    /// A required field was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The requested record does not exist (or is soft-deleted).
    #[error("{0} not found")]
    NotFound(String),

    /// A generic conflict with existing state.
    #[error("{0}")]
    Conflict(String),

    /// The principal has no view/edit permission on the document.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// A document type with the same code already exists in the company.
    #[error("document type code '{code}' already exists")]
    DuplicateCode {
        /// The existing (uppercased) code that collided.
        code: String,
    },

    /// The type code cannot change once documents reference the type.
    #[error("document type code is immutable: {document_count} document(s) reference it")]
    ImmutableTypeCode {
        /// The document type whose code the caller tried to change.
        type_id: Uuid,
        /// How many documents currently reference the type.
        document_count: u64,
    },

    /// The requested parent folder does not exist.
    #[error("parent folder {0} not found")]
    ParentNotFound(Uuid),

    /// The folder still contains folders or documents and cascade was not requested.
    #[error("folder is not empty: {child_folders} child folder(s), {documents} document(s)")]
    FolderNotEmpty {
        /// Direct child folder count.
        child_folders: u64,
        /// Direct document count.
        documents: u64,
    },

    /// Another principal holds an unexpired checkout lock.
    #[error("document is checked out by {holder} until {expires_at}")]
    AlreadyCheckedOut {
        /// The current lock holder.
        holder: Uuid,
        /// When the current lease lapses.
        expires_at: DateTime<Utc>,
    },

    /// The caller is not the recorded checkout holder.
    #[error("document is not checked out by the caller")]
    NotCheckedOutByYou {
        /// The current holder, if any.
        holder: Option<Uuid>,
    },

    /// The document is under legal hold; destructive and content-changing
    /// operations are blocked.
    #[error("document is under legal hold")]
    LegalHoldActive,

    /// The retention period has not elapsed and no override was supplied.
    #[error("retention period active until {expires_at}")]
    RetentionActive {
        /// When the document becomes eligible for deletion.
        expires_at: DateTime<Utc>,
    },

    /// The requested workflow transition is not legal from the current state.
    #[error("invalid workflow transition: {from} -> {to}")]
    InvalidTransition {
        /// The document's current status.
        from: String,
        /// The requested target status.
        to: String,
    },

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),

    /// Configuration could not be loaded or was inconsistent.
    #[error("{0}")]
    Configuration(String),
}

impl AppError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::ParentNotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_)
            | Self::DuplicateCode { .. }
            | Self::ImmutableTypeCode { .. }
            | Self::FolderNotEmpty { .. }
            | Self::AlreadyCheckedOut { .. }
            | Self::NotCheckedOutByYou { .. }
            | Self::InvalidTransition { .. } => ErrorKind::Conflict,
            Self::LegalHoldActive | Self::RetentionActive { .. } => ErrorKind::Policy,
            Self::AccessDenied(_) => ErrorKind::Authorization,
            Self::Internal(_) => ErrorKind::Internal,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error. The message names the missing record.
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    /// Create a generic conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create an access-denied error.
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

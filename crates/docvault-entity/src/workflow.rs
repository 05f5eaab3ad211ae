//! Approval workflow status and its transition rules.

use std::fmt;
use std::str::FromStr;

use docvault_core::AppError;
use serde::{Deserialize, Serialize};

/// Workflow state of a document.
///
/// Legal transitions:
/// `Draft -> PendingReview -> Approved -> Published`, with rejection
/// returning a pending document to `Draft`, and `Cancelled` reachable from
/// any non-terminal state. All other moves are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Being authored; not yet submitted.
    Draft,
    /// Submitted, awaiting an approval decision.
    PendingReview,
    /// Approved by a reviewer.
    Approved,
    /// Released; terminal.
    Published,
    /// Abandoned; terminal.
    Cancelled,
}

impl DocumentStatus {
    /// Whether no further transitions are possible from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Published | Self::Cancelled)
    }

    /// Attempt a transition to `target`.
    ///
    /// This is the single authority on workflow legality; illegal moves
    /// return [`AppError::InvalidTransition`] and no other code path
    /// changes a document's status.
    pub fn transition(self, target: DocumentStatus) -> Result<DocumentStatus, AppError> {
        let legal = matches!(
            (self, target),
            (Self::Draft, Self::PendingReview)
                | (Self::PendingReview, Self::Approved)
                | (Self::PendingReview, Self::Draft)
                | (Self::Approved, Self::Published)
        ) || (target == Self::Cancelled && !self.is_terminal());

        if legal {
            Ok(target)
        } else {
            Err(AppError::InvalidTransition {
                from: self.to_string(),
                to: target.to_string(),
            })
        }
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::Published => "published",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending_review" => Ok(Self::PendingReview),
            "approved" => Ok(Self::Approved),
            "published" => Ok(Self::Published),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::validation(format!(
                "Invalid document status: '{s}'"
            ))),
        }
    }
}

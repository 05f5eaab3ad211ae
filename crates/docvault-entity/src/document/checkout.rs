//! Checkout lock state machine.
//!
//! The authoritative lock state is this enum; the flat `is_checked_out` /
//! `checked_out_*` columns on [`super::Document`] are a serialization
//! projection of it and are only written through
//! [`super::Document::set_checkout_state`].

use chrono::{DateTime, Duration, Utc};
use docvault_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The exclusive-edit lock state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutState {
    /// No one holds the lock.
    Available,
    /// A principal holds a time-bounded lease.
    CheckedOut {
        /// The lock holder.
        by: Uuid,
        /// When the lock was acquired.
        at: DateTime<Utc>,
        /// When the lease lapses.
        expires_at: DateTime<Utc>,
        /// A previous holder whose lease expired and was taken over, still
        /// entitled to complete one check-in.
        grace_user: Option<Uuid>,
    },
}

/// How a successful check-in was authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// The caller was the current holder; the lock is released.
    Holder,
    /// The caller was the graced previous holder; the current holder's lock
    /// remains in place.
    Grace,
}

impl CheckoutState {
    /// The current lock holder, if any.
    pub fn holder(&self) -> Option<Uuid> {
        match self {
            Self::Available => None,
            Self::CheckedOut { by, .. } => Some(*by),
        }
    }

    /// Whether the lease has lapsed as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::Available => false,
            Self::CheckedOut { expires_at, .. } => *expires_at <= now,
        }
    }

    /// Attempt to acquire the lock for `user_id`.
    ///
    /// Expiry is lazy: an expired lease counts as available to a different
    /// user, and the displaced holder is remembered for one grace check-in.
    /// The current holder re-acquiring renews the lease.
    pub fn acquire(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        lease: Duration,
    ) -> Result<CheckoutState, AppError> {
        match *self {
            Self::Available => Ok(Self::CheckedOut {
                by: user_id,
                at: now,
                expires_at: now + lease,
                grace_user: None,
            }),
            Self::CheckedOut {
                by,
                expires_at,
                grace_user,
                ..
            } => {
                if by == user_id {
                    // Renewal by the current holder.
                    Ok(Self::CheckedOut {
                        by,
                        at: now,
                        expires_at: now + lease,
                        grace_user,
                    })
                } else if expires_at <= now {
                    Ok(Self::CheckedOut {
                        by: user_id,
                        at: now,
                        expires_at: now + lease,
                        grace_user: Some(by),
                    })
                } else {
                    Err(AppError::AlreadyCheckedOut {
                        holder: by,
                        expires_at,
                    })
                }
            }
        }
    }

    /// Attempt to release the lock on behalf of `user_id`.
    ///
    /// The recorded holder always succeeds, even past expiry. A graced
    /// previous holder succeeds exactly once without disturbing the current
    /// holder's lease.
    pub fn release(&self, user_id: Uuid) -> Result<(CheckoutState, CheckinOutcome), AppError> {
        match *self {
            Self::Available => Err(AppError::NotCheckedOutByYou { holder: None }),
            Self::CheckedOut {
                by,
                at,
                expires_at,
                grace_user,
            } => {
                if by == user_id {
                    Ok((Self::Available, CheckinOutcome::Holder))
                } else if grace_user == Some(user_id) {
                    Ok((
                        Self::CheckedOut {
                            by,
                            at,
                            expires_at,
                            grace_user: None,
                        },
                        CheckinOutcome::Grace,
                    ))
                } else {
                    Err(AppError::NotCheckedOutByYou { holder: Some(by) })
                }
            }
        }
    }
}

//! Checkout lock configuration.

use serde::{Deserialize, Serialize};

/// Settings governing the exclusive-edit checkout lease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Lease duration in minutes. A lock older than this counts as expired
    /// for the purposes of a new checkout by a different user.
    #[serde(default = "default_lease_minutes")]
    pub lease_minutes: i64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            lease_minutes: default_lease_minutes(),
        }
    }
}

fn default_lease_minutes() -> i64 {
    30
}

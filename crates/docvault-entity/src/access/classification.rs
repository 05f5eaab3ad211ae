//! Document classification labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Four-tier confidentiality label driving default access.
///
/// `Public` and `Internal` grant default view access; `Confidential` and
/// `Restricted` require an explicit grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Viewable by any authenticated principal.
    Public,
    /// Viewable by any principal in the same company.
    Internal,
    /// No default access; an explicit grant is required.
    Confidential,
    /// No default access; an explicit grant is required.
    Restricted,
}

impl Classification {
    /// Whether this label grants no access without an explicit grant.
    pub fn requires_explicit_grant(&self) -> bool {
        matches!(self, Self::Confidential | Self::Restricted)
    }

    /// Return the label as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Confidential => "confidential",
            Self::Restricted => "restricted",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Classification {
    type Err = docvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "internal" => Ok(Self::Internal),
            "confidential" => Ok(Self::Confidential),
            "restricted" => Ok(Self::Restricted),
            _ => Err(docvault_core::AppError::validation(format!(
                "Invalid classification: '{s}'"
            ))),
        }
    }
}

/// Legacy coarse access flag, retained for backward compatibility.
///
/// New access decisions are driven by [`Classification`]; this field is
/// only carried so existing records round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Anyone may view.
    Public,
    /// Owner only.
    Private,
    /// Explicitly granted principals only.
    Restricted,
}

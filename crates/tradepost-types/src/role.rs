//! Access-control roles for the currency ledger.

use serde::{Deserialize, Serialize};

/// A role that can be granted to an account.
///
/// `Admin` administers every role, itself included. `Moderator` may mint
/// and burn currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Moderator,
}

impl Role {
    /// The role whose holders may grant and revoke `self`.
    #[must_use]
    pub fn admin_role(self) -> Role {
        match self {
            Self::Admin | Self::Moderator => Self::Admin,
        }
    }

    /// Stable one-byte tag used when hashing ledger state.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            Self::Admin => 0,
            Self::Moderator => 1,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "DEFAULT_ADMIN_ROLE"),
            Self::Moderator => write!(f, "MODERATOR_ROLE"),
        }
    }
}

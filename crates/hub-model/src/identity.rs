//! Session identity

use serde::{Deserialize, Serialize};

/// Authorization state of the current session.
///
/// Set once at process start from configuration and never mutated
/// afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    is_admin: bool,
}

impl AdminIdentity {
    /// Identity with the given admin flag
    #[inline]
    #[must_use]
    pub const fn new(is_admin: bool) -> Self {
        Self { is_admin }
    }

    /// Identity with submission rights
    #[inline]
    #[must_use]
    pub const fn admin() -> Self {
        Self::new(true)
    }

    /// Identity without submission rights
    #[inline]
    #[must_use]
    pub const fn visitor() -> Self {
        Self::new(false)
    }

    /// Whether the session has submission rights
    #[inline]
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }
}

//! Admin gate
//!
//! Decides whether submission entry points are offered to the session.

use hub_model::AdminIdentity;
use std::sync::Arc;

/// Read-only authorization check for submission affordances.
///
/// Advisory UI gating: it decides whether entry points are shown, it
/// does not guard the workflow operations themselves.
#[derive(Debug, Clone)]
pub struct AdminGate {
    identity: Arc<AdminIdentity>,
}

impl AdminGate {
    /// Gate over the identity frozen at startup
    #[must_use]
    pub fn new(identity: Arc<AdminIdentity>) -> Self {
        Self { identity }
    }

    /// Whether the session may see and use submission entry points
    #[inline]
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.identity.is_admin()
    }
}

impl From<AdminIdentity> for AdminGate {
    fn from(identity: AdminIdentity) -> Self {
        Self::new(Arc::new(identity))
    }
}

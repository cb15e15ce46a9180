//! Helper types for the lifecycle worker
//!
//! Cleanup observer bookkeeping and best-effort session teardown.

use std::collections::HashMap;

use super::session::SessionHandle;
use crate::adapter::CapabilityAdapter;
use crate::types::identifiers::CapabilityName;
use crate::types::observers::{CleanupObserver, ObserverId};

/// Registered cleanup observers of one manager
#[derive(Default)]
pub(super) struct ObserverSet {
    observers: HashMap<ObserverId, CleanupObserver>,
}

impl ObserverSet {
    pub(super) fn insert(&mut self, observer: CleanupObserver) -> ObserverId {
        let id = ObserverId::next();
        self.observers.insert(id, observer);
        id
    }

    pub(super) fn remove(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub(super) fn len(&self) -> usize {
        self.observers.len()
    }

    /// Remove and return every observer
    pub(super) fn drain(&mut self) -> Vec<CleanupObserver> {
        self.observers.drain().map(|(_, observer)| observer).collect()
    }
}

/// Destroy `session`, logging instead of propagating a failure
///
/// A failed destroy must not block installing new state: the manager has
/// already dropped the session from its cache either way.
pub(super) async fn destroy_quietly<A: CapabilityAdapter>(
    adapter: &A,
    capability: &CapabilityName,
    session: &SessionHandle<A::Session>,
) {
    log::debug!("[{capability}] destroying session {}", session.id());
    if let Err(e) = adapter.destroy(session).await {
        log::warn!(
            "[{capability}] failed to destroy session {}: {e}",
            session.id()
        );
    }
}

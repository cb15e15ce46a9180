//! Capability manager registry
//!
//! Holds at most one manager per capability kind. Managers are constructed
//! lazily on first access and torn down through an explicit reset; nothing
//! here is process-global, so each registry is an independent scope.

use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CapabilityError, Result};
use crate::types::capability::{CapabilityKind, CapabilitySet};
use crate::types::options::ManagerConfig;

/// Type-erased view of a capability manager, as held by the registry
pub trait CapabilityManager: Send + Sync + 'static {
    /// Capability kind of this manager type
    fn static_kind() -> CapabilityKind
    where
        Self: Sized;

    /// Capability kind of this manager
    fn kind(&self) -> CapabilityKind;

    /// Whether the manager has a ready session
    fn is_ready(&self) -> bool;

    /// Destroy the manager's session and notify its cleanup observers
    fn cleanup(&self) -> BoxFuture<'_, Result<()>>;
}

struct RegistryEntry {
    manager: Arc<dyn CapabilityManager>,
    typed: Arc<dyn Any + Send + Sync>,
}

/// Registry of lazily constructed capability managers
///
/// Cloning is cheap; clones share the same managers.
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    managers: Arc<Mutex<HashMap<CapabilityKind, RegistryEntry>>>,
}

impl CapabilityRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the manager of type `M`, constructing it with `init` on first access
    ///
    /// `config` is only used when the manager is constructed. Passing a
    /// config for a manager that already exists has no effect.
    ///
    /// # Errors
    /// Returns `CapabilityError::Registry` if a manager of a different type is
    /// already registered for the same capability kind
    ///
    /// # Panics
    /// Panics if the manager has to be constructed outside a tokio runtime
    pub fn get_instance<M, F>(&self, config: Option<ManagerConfig>, init: F) -> Result<Arc<M>>
    where
        M: CapabilityManager,
        F: FnOnce(ManagerConfig) -> M,
    {
        let kind = M::static_kind();
        let mut managers = self.managers.lock();

        if let Some(entry) = managers.get(&kind) {
            if config.is_some() {
                log::debug!("[{kind}] manager already constructed, ignoring new config");
            }
            return Arc::clone(&entry.typed).downcast::<M>().map_err(|_| {
                CapabilityError::registry(format!(
                    "{kind} is registered with a different manager type"
                ))
            });
        }

        log::debug!("[{kind}] constructing manager");
        let manager = Arc::new(init(config.unwrap_or_default()));
        managers.insert(
            kind,
            RegistryEntry {
                manager: manager.clone(),
                typed: manager.clone(),
            },
        );
        Ok(manager)
    }

    /// Clean up and forget the manager for `kind`
    ///
    /// The next `get_instance` for `kind` constructs a fresh manager. Returns
    /// `false` if no manager was registered.
    ///
    /// # Errors
    /// Returns error if the manager's cleanup fails
    pub async fn reset_instance(&self, kind: CapabilityKind) -> Result<bool> {
        let entry = self.managers.lock().remove(&kind);
        match entry {
            Some(entry) => {
                log::debug!("[{kind}] resetting manager");
                entry.manager.cleanup().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clean up and forget every manager
    ///
    /// Returns the number of managers reset. Cleanup failures are logged.
    pub async fn reset_all(&self) -> usize {
        let entries: Vec<(CapabilityKind, RegistryEntry)> =
            self.managers.lock().drain().collect();

        let count = entries.len();
        for (kind, entry) in entries {
            if let Err(e) = entry.manager.cleanup().await {
                log::warn!("[{kind}] failed to clean up manager during reset: {e}");
            }
        }
        count
    }

    /// Whether a manager is registered for `kind`
    #[must_use]
    pub fn contains(&self, kind: CapabilityKind) -> bool {
        self.managers.lock().contains_key(&kind)
    }

    /// Kinds whose manager currently has a ready session
    #[must_use]
    pub fn ready_set(&self) -> CapabilitySet {
        self.managers
            .lock()
            .values()
            .filter(|entry| entry.manager.is_ready())
            .map(|entry| entry.manager.kind())
            .collect()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let managers = self.managers.lock();
        let kinds: Vec<_> = managers.keys().collect();
        f.debug_struct("CapabilityRegistry")
            .field("managers", &kinds)
            .finish()
    }
}

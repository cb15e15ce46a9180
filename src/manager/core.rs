//! Core lifecycle manager structure
//!
//! Provides `LifecycleManager`, the capability-agnostic controller shared by
//! every concrete capability manager.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::background::{SharedState, WorkerContext, spawn_lifecycle_worker};
use super::commands::LifecycleCommand;
use super::helpers::ObserverSet;
use super::session::{LifecycleState, SessionHandle};
use crate::adapter::CapabilityAdapter;
use crate::error::{CapabilityError, Result};
use crate::types::availability::Availability;
use crate::types::config::SessionConfig;
use crate::types::identifiers::CapabilityName;
use crate::types::observers::{CleanupObserver, ObserverId};
use crate::types::options::ManagerConfig;

// ============================================================================
// LIFECYCLE MANAGER CORE
// ============================================================================

/// Creation, caching and teardown of one capability's engine session
///
/// The `LifecycleManager` holds at most one live session at a time and
/// handles:
/// - Session reuse while the requested configuration is unchanged
/// - Availability gating before any new session is created
/// - Destroying the stale session before a replacement is installed
/// - Waiting for the optional readiness signal of a new session
/// - Cleanup observers notified on teardown
///
/// Requests are serialized through a background worker, so concurrent
/// callers asking for different configurations are served strictly in
/// order and the last request wins.
pub struct LifecycleManager<A: CapabilityAdapter> {
    adapter: Arc<A>,
    capability: CapabilityName,
    config: ManagerConfig,
    state: SharedState<A>,
    observers: Arc<Mutex<ObserverSet>>,
    command_tx: mpsc::UnboundedSender<LifecycleCommand<A>>,
}

impl<A: CapabilityAdapter> LifecycleManager<A> {
    /// Create a new `LifecycleManager` with its background lifecycle worker
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime
    #[must_use]
    pub fn new(adapter: A, config: ManagerConfig) -> Self {
        let adapter = Arc::new(adapter);
        let capability = adapter.capability();
        let state: SharedState<A> = Arc::new(Mutex::new(LifecycleState::new()));
        let observers = Arc::new(Mutex::new(ObserverSet::default()));
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        spawn_lifecycle_worker(
            command_rx,
            WorkerContext {
                adapter: Arc::clone(&adapter),
                capability: capability.clone(),
                config: config.clone(),
                state: Arc::clone(&state),
                observers: Arc::clone(&observers),
            },
        );

        Self {
            adapter,
            capability,
            config,
            state,
            observers,
            command_tx,
        }
    }

    /// Get the cached session for `config`, creating it if needed
    ///
    /// Returns the cached session when it was created from a structurally
    /// equal configuration. Otherwise probes availability, destroys the
    /// cached session, creates a new one and waits for its readiness signal.
    ///
    /// # Errors
    /// - `CapabilityError::Configuration` if `config` fails validation (no engine call is made)
    /// - `CapabilityError::Unavailable` if the engine reports the capability unavailable
    ///   (the cached session, if any, is kept)
    /// - `CapabilityError::Initialization` if probing, creation or readiness fails
    ///   (the manager is left without a session)
    pub async fn get_or_create(&self, config: A::Config) -> Result<SessionHandle<A::Session>> {
        if let Err(e) = config.validate() {
            log::warn!("[{}] rejected configuration {config:?}: {e}", self.capability);
            self.config.report_error(&e);
            return Err(e);
        }

        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(LifecycleCommand::Acquire {
                config,
                response_tx,
            })
            .map_err(|_| CapabilityError::manager_closed(&self.capability))?;

        response_rx
            .await
            .map_err(|_| CapabilityError::manager_closed(&self.capability))?
    }

    /// Get the session installed when this request is reached in the queue
    ///
    /// Unlike [`LifecycleManager::get_or_create`] this never replaces a ready
    /// session, whatever configuration it was created from; `default` is only
    /// used to create one when none is installed. Requests queued earlier,
    /// such as an option change, are applied first.
    ///
    /// # Errors
    /// Same as [`LifecycleManager::get_or_create`] for `default`
    pub async fn get_or_create_current(
        &self,
        default: A::Config,
    ) -> Result<SessionHandle<A::Session>> {
        if let Err(e) = default.validate() {
            log::warn!("[{}] rejected configuration {default:?}: {e}", self.capability);
            self.config.report_error(&e);
            return Err(e);
        }

        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(LifecycleCommand::AcquireCurrent {
                default,
                response_tx,
            })
            .map_err(|_| CapabilityError::manager_closed(&self.capability))?;

        response_rx
            .await
            .map_err(|_| CapabilityError::manager_closed(&self.capability))?
    }

    /// Destroy the session, reset state and notify cleanup observers
    ///
    /// Observers run after state has been reset and are then unregistered.
    ///
    /// # Errors
    /// Returns `CapabilityError::ManagerClosed` if the lifecycle worker is gone
    pub async fn cleanup(&self) -> Result<()> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(LifecycleCommand::Cleanup { response_tx })
            .map_err(|_| CapabilityError::manager_closed(&self.capability))?;
        response_rx
            .await
            .map_err(|_| CapabilityError::manager_closed(&self.capability))
    }

    /// Whether a ready session is cached
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state.lock().is_ready()
    }

    /// Copy of the configuration of the cached session
    #[must_use]
    pub fn current_config(&self) -> Option<A::Config> {
        self.state.lock().current_config.clone()
    }

    /// The cached session, if one is ready
    ///
    /// Never creates a session.
    #[must_use]
    pub fn current_session(&self) -> Option<SessionHandle<A::Session>> {
        let state = self.state.lock();
        if state.is_ready() {
            state.session.clone()
        } else {
            None
        }
    }

    /// Query availability for `config` without gating or creating anything
    ///
    /// # Errors
    /// Returns error if the engine cannot answer the query
    pub async fn availability(&self, config: &A::Config) -> Result<Availability> {
        self.adapter.availability(config).await
    }

    /// Register an observer notified on the next cleanup
    pub fn on_cleanup(&self, observer: CleanupObserver) -> ObserverId {
        self.observers.lock().insert(observer)
    }

    /// Unregister a cleanup observer
    ///
    /// Returns `false` if the observer was not registered (or already ran).
    pub fn off_cleanup(&self, id: ObserverId) -> bool {
        self.observers.lock().remove(id)
    }

    /// Number of registered cleanup observers
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.lock().len()
    }

    /// Capability name used in diagnostics
    #[must_use]
    pub const fn capability(&self) -> &CapabilityName {
        &self.capability
    }

    /// Construction-time configuration
    #[must_use]
    pub const fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The engine adapter
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}

impl<A: CapabilityAdapter> std::fmt::Debug for LifecycleManager<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LifecycleManager")
            .field("capability", &self.capability)
            .field("session", &state.session)
            .field("current_config", &state.current_config)
            .field("initialized", &state.initialized)
            .finish_non_exhaustive()
    }
}

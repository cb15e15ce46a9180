//! Capability adapter: the seam between a lifecycle manager and the engine
//!
//! The on-device engine exposes each capability through the same four
//! operations: an availability query, an asynchronous and fallible `create`,
//! a `destroy` that releases native resources, and an optional readiness
//! signal completing once deferred setup (such as a model download) is done.
//! A [`CapabilityAdapter`] implementation binds those operations for one
//! capability; [`crate::manager::LifecycleManager`] drives them.

use futures::future::BoxFuture;
use std::future::Future;

use crate::availability::DownloadMonitor;
use crate::error::Result;
use crate::types::availability::Availability;
use crate::types::config::SessionConfig;
use crate::types::identifiers::CapabilityName;

/// Readiness signal for a freshly created session
pub type ReadySignal = BoxFuture<'static, Result<()>>;

/// Engine binding for one capability
///
/// Only the owning manager ever calls [`CapabilityAdapter::destroy`]; sessions
/// handed to callers expose capability operations but no way to release them.
pub trait CapabilityAdapter: Send + Sync + 'static {
    /// Configuration used as the session cache key
    type Config: SessionConfig;

    /// Opaque engine session
    type Session: Send + Sync + 'static;

    /// Capability name used in diagnostics and availability probes
    fn capability(&self) -> CapabilityName;

    /// Query whether a session for `config` can be created
    ///
    /// Must be read-only and idempotent.
    ///
    /// # Errors
    /// Returns error if the engine cannot answer the query
    fn availability(
        &self,
        config: &Self::Config,
    ) -> impl Future<Output = Result<Availability>> + Send;

    /// Create a new engine session for `config`
    ///
    /// `monitor` receives model download progress if the engine has to fetch
    /// weights before the session is usable.
    ///
    /// # Errors
    /// Returns error if the engine rejects creation
    fn create(
        &self,
        config: &Self::Config,
        monitor: DownloadMonitor,
    ) -> impl Future<Output = Result<Self::Session>> + Send;

    /// Release the native resources held by `session`
    ///
    /// # Errors
    /// Returns error if the engine reports a failure while releasing
    fn destroy(&self, session: &Self::Session) -> impl Future<Output = Result<()>> + Send;

    /// Optional readiness signal of a freshly created session
    fn ready(&self, _session: &Self::Session) -> Option<ReadySignal> {
        None
    }
}

//! Callback type definitions
//!
//! This module contains the callback types collaborators register with a
//! manager: cleanup observers, download progress hooks and error hooks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::availability::DownloadProgress;
use super::identifiers::CapabilityName;
use crate::error::CapabilityError;

// ============================================================================
// Callback Types
// ============================================================================

/// Cleanup observer callback
///
/// Invoked after a manager has torn down its session and reset its state.
/// Receives the capability name of the manager that cleaned up.
pub type CleanupObserver = Arc<dyn Fn(&CapabilityName) + Send + Sync>;

/// Download progress callback
pub type DownloadProgressCallback = Arc<dyn Fn(&DownloadProgress) + Send + Sync>;

/// Error hook, invoked with every failure a manager surfaces to its caller
pub type ErrorCallback = Arc<dyn Fn(&CapabilityError) + Send + Sync>;

/// Handle returned by `on_cleanup`, used to unregister the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Allocate a process-unique observer ID
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Create a cleanup observer from a closure
pub fn cleanup_observer<F>(f: F) -> CleanupObserver
where
    F: Fn(&CapabilityName) + Send + Sync + 'static,
{
    Arc::new(f)
}

//! Lifecycle command protocol
//!
//! Defines the command messages queued to a manager's lifecycle worker.
//! The worker handles them one at a time, in the order they were sent.

use tokio::sync::oneshot;

use super::session::SessionHandle;
use crate::adapter::CapabilityAdapter;
use crate::error::Result;

/// Commands that can be sent to a lifecycle worker
pub(super) enum LifecycleCommand<A: CapabilityAdapter> {
    /// Return the cached session for `config`, recreating it if needed
    Acquire {
        /// Requested session configuration (already validated)
        config: A::Config,
        /// Channel to send the session back
        response_tx: oneshot::Sender<Result<SessionHandle<A::Session>>>,
    },

    /// Return whatever session is installed, creating one from `default`
    /// only if none is
    AcquireCurrent {
        /// Configuration used when no session is installed (already validated)
        default: A::Config,
        /// Channel to send the session back
        response_tx: oneshot::Sender<Result<SessionHandle<A::Session>>>,
    },

    /// Destroy the session, reset state and notify cleanup observers
    Cleanup {
        /// Channel to send the cleanup confirmation back
        response_tx: oneshot::Sender<()>,
    },
}

//! Availability probing and download monitoring
//!
//! The prober turns the engine's four-state availability answer into a
//! creation gate: `unavailable` fails with
//! [`CapabilityError::Unavailable`](crate::CapabilityError::Unavailable),
//! every other state lets creation proceed. Probing is never retried here;
//! callers decide whether to ask again.

use crate::adapter::CapabilityAdapter;
use crate::error::{CapabilityError, Result};
use crate::types::availability::{Availability, DownloadProgress};
use crate::types::identifiers::CapabilityName;
use crate::types::observers::DownloadProgressCallback;

/// Probe `adapter` for `config` and gate session creation on the answer
///
/// Returns the availability when a session may be created. A query that
/// fails outright is reported as an initialization error.
///
/// # Errors
/// - `CapabilityError::Unavailable` when the engine reports `unavailable`
/// - `CapabilityError::Initialization` when the query itself fails
pub async fn probe<A: CapabilityAdapter>(adapter: &A, config: &A::Config) -> Result<Availability> {
    let capability = adapter.capability();
    let availability = adapter
        .availability(config)
        .await
        .map_err(|e| e.into_initialization(&capability))?;

    log::debug!("[{capability}] availability: {availability}");

    match availability {
        Availability::Unavailable => Err(CapabilityError::unavailable(capability)),
        Availability::Downloadable | Availability::Downloading => {
            log::info!("[{capability}] model not on device ({availability}), awaiting download");
            Ok(availability)
        }
        Availability::Available => Ok(availability),
    }
}

/// Download progress sink handed to [`CapabilityAdapter::create`]
///
/// Adapters call [`DownloadMonitor::report`] with the fraction of the model
/// fetched so far. Progress is logged and forwarded to the manager's
/// progress callback, if one was configured.
#[derive(Clone)]
pub struct DownloadMonitor {
    capability: CapabilityName,
    callback: Option<DownloadProgressCallback>,
}

impl DownloadMonitor {
    /// Create a monitor forwarding to `callback`
    pub fn new(
        capability: impl Into<CapabilityName>,
        callback: Option<DownloadProgressCallback>,
    ) -> Self {
        Self {
            capability: capability.into(),
            callback,
        }
    }

    /// Create a monitor that only logs
    pub fn detached(capability: impl Into<CapabilityName>) -> Self {
        Self::new(capability, None)
    }

    /// Capability this monitor reports for
    #[must_use]
    pub const fn capability(&self) -> &CapabilityName {
        &self.capability
    }

    /// Report download progress as a fraction in `[0.0, 1.0]`
    pub fn report(&self, loaded: f64) {
        let progress = DownloadProgress::new(self.capability.clone(), loaded);
        log::debug!(
            "[{}] model download {:.0}%",
            self.capability,
            progress.loaded * 100.0
        );
        if let Some(callback) = &self.callback {
            callback(&progress);
        }
    }
}

impl std::fmt::Debug for DownloadMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadMonitor")
            .field("capability", &self.capability)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

//! Availability and download progress types
//!
//! The engine reports whether a capability can be used before any session is
//! created. Models that are not yet on the device may be fetched on demand,
//! in which case progress events are reported while creation is in flight.

use serde::{Deserialize, Serialize};

use super::identifiers::CapabilityName;

// ============================================================================
// Availability
// ============================================================================

/// Result of an availability probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// The capability cannot be used on this device
    Unavailable,
    /// The model is present and a session can be created immediately
    Available,
    /// The model must be downloaded; creating a session starts the download
    Downloadable,
    /// A download is already in progress
    Downloading,
}

impl Availability {
    /// Whether a session may be created in this state
    #[must_use]
    pub const fn can_create(self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// Whether creating a session will block on fetching model weights
    #[must_use]
    pub const fn needs_download(self) -> bool {
        matches!(self, Self::Downloadable | Self::Downloading)
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unavailable => "unavailable",
            Self::Available => "available",
            Self::Downloadable => "downloadable",
            Self::Downloading => "downloading",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Download progress
// ============================================================================

/// Model download progress event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadProgress {
    /// Capability whose model is being fetched
    pub capability: CapabilityName,
    /// Fraction downloaded, always within `[0.0, 1.0]`
    pub loaded: f64,
}

impl DownloadProgress {
    /// Create a progress event, clamping `loaded` into `[0.0, 1.0]`
    ///
    /// Non-finite values are reported as `0.0`.
    pub fn new(capability: impl Into<CapabilityName>, loaded: f64) -> Self {
        let loaded = if loaded.is_finite() {
            loaded.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            capability: capability.into(),
            loaded,
        }
    }

    /// Whether the download has finished
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.loaded >= 1.0
    }
}

//! Error types for capability session management

use thiserror::Error;

use crate::types::identifiers::CapabilityName;

/// Main error type for capability session management
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The availability probe reported the capability as unusable
    #[error("Capability unavailable: {capability}")]
    Unavailable {
        /// Capability that was probed
        capability: CapabilityName,
    },

    /// Session creation, the availability probe itself, or the readiness signal failed
    #[error("Failed to initialize {capability} session: {message}")]
    Initialization {
        /// Capability whose session failed to initialize
        capability: CapabilityName,
        /// Error message
        message: String,
    },

    /// Malformed configuration detected before any engine call was made
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A live session rejected a capability operation
    #[error("{capability} engine error: {message}")]
    Engine {
        /// Capability whose session failed
        capability: CapabilityName,
        /// Error message
        message: String,
    },

    /// The lifecycle worker for a manager is no longer running
    #[error("Lifecycle manager for {0} is closed")]
    ManagerClosed(CapabilityName),

    /// Registry lookup produced a manager of an unexpected type
    #[error("Registry error: {0}")]
    Registry(String),
}

/// Result type alias for capability session operations
pub type Result<T> = std::result::Result<T, CapabilityError>;

impl CapabilityError {
    /// Create a capability unavailable error
    pub fn unavailable(capability: impl Into<CapabilityName>) -> Self {
        Self::Unavailable {
            capability: capability.into(),
        }
    }

    /// Create an initialization error
    pub fn initialization(capability: impl Into<CapabilityName>, msg: impl Into<String>) -> Self {
        Self::Initialization {
            capability: capability.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an engine error
    pub fn engine(capability: impl Into<CapabilityName>, msg: impl Into<String>) -> Self {
        Self::Engine {
            capability: capability.into(),
            message: msg.into(),
        }
    }

    /// Create a manager closed error
    pub fn manager_closed(capability: impl Into<CapabilityName>) -> Self {
        Self::ManagerClosed(capability.into())
    }

    /// Create a registry error
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    /// Re-tag an arbitrary failure as an initialization error for `capability`
    ///
    /// Unavailability and configuration errors keep their own variant so that
    /// callers can still tell "cannot ever work" apart from "failed this time".
    #[must_use]
    pub fn into_initialization(self, capability: &CapabilityName) -> Self {
        match self {
            Self::Unavailable { .. } | Self::Configuration(_) | Self::Initialization { .. } => {
                self
            }
            other => Self::initialization(capability.clone(), other.to_string()),
        }
    }

    /// Whether this error means the capability cannot be used at all on this device
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

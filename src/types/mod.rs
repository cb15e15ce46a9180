//! Type definitions for capability session management
//!
//! This module contains the type definitions shared by every capability,
//! organized into logical submodules:
//!
//! - [`identifiers`] - Type-safe ID wrappers (`SessionId`, `CapabilityName`, `LanguageTag`)
//! - [`availability`] - Availability states and download progress
//! - [`capability`] - Capability kinds and capability sets
//! - [`config`] - The session configuration contract used as cache key
//! - [`observers`] - Cleanup observer, progress and error callbacks
//! - [`options`] - Construction-time manager configuration

pub mod availability;
pub mod capability;
pub mod config;
pub mod identifiers;
pub mod observers;
pub mod options;

// Re-export commonly used types
pub use availability::{Availability, DownloadProgress};
pub use capability::{CapabilityKind, CapabilitySet};
pub use config::{SessionConfig, config_changed};
pub use identifiers::{CapabilityName, LanguageTag, SessionId};
pub use observers::{
    CleanupObserver, DownloadProgressCallback, ErrorCallback, ObserverId, cleanup_observer,
};
pub use options::{ManagerConfig, ManagerConfigBuilder};

//! Manager options and configuration
//!
//! `ManagerConfig` is fixed when a manager is constructed and never changes
//! afterwards. Per-call session configuration lives in [`super::config`].

use super::availability::DownloadProgress;
use super::observers::{DownloadProgressCallback, ErrorCallback};
use crate::error::CapabilityError;

// ============================================================================
// Manager Config
// ============================================================================

/// Construction-time options for a lifecycle manager
#[derive(Clone, Default)]
pub struct ManagerConfig {
    /// Receives model download progress while a session is being created
    pub on_download_progress: Option<DownloadProgressCallback>,
    /// Invoked with every failure surfaced to a caller, before it is returned
    pub on_error: Option<ErrorCallback>,
}

impl ManagerConfig {
    /// Create a new builder for `ManagerConfig`
    #[must_use]
    pub fn builder() -> ManagerConfigBuilder {
        ManagerConfigBuilder::default()
    }

    pub(crate) fn report_error(&self, error: &CapabilityError) {
        if let Some(callback) = &self.on_error {
            callback(error);
        }
    }
}

impl std::fmt::Debug for ManagerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerConfig")
            .field(
                "on_download_progress",
                &self.on_download_progress.as_ref().map(|_| "<callback>"),
            )
            .field("on_error", &self.on_error.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

// ============================================================================
// Builder for ManagerConfig
// ============================================================================

/// Builder for `ManagerConfig`
#[derive(Debug, Default)]
pub struct ManagerConfigBuilder {
    config: ManagerConfig,
}

impl ManagerConfigBuilder {
    /// Set the download progress callback
    #[must_use]
    pub fn on_download_progress<F>(mut self, f: F) -> Self
    where
        F: Fn(&DownloadProgress) + Send + Sync + 'static,
    {
        self.config.on_download_progress = Some(std::sync::Arc::new(f));
        self
    }

    /// Set the error hook
    #[must_use]
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&CapabilityError) + Send + Sync + 'static,
    {
        self.config.on_error = Some(std::sync::Arc::new(f));
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> ManagerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_defaults_are_empty() {
        let config = ManagerConfig::default();
        assert!(config.on_error.is_none());
        assert!(config.on_download_progress.is_none());
    }

    #[test]
    fn test_builder_hooks_are_invoked() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_progress = Arc::clone(&seen);
        let seen_error = Arc::clone(&seen);
        let config = ManagerConfig::builder()
            .on_download_progress(move |_| {
                seen_progress.fetch_add(1, Ordering::SeqCst);
            })
            .on_error(move |_| {
                seen_error.fetch_add(10, Ordering::SeqCst);
            })
            .build();

        let progress = config.on_download_progress.as_ref().unwrap();
        progress(&DownloadProgress::new("summarizer", 0.5));
        config.report_error(&CapabilityError::configuration("bad"));

        assert_eq!(seen.load(Ordering::SeqCst), 11);
    }
}

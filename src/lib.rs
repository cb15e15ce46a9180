//! # Capability Sessions
//!
//! Lifecycle management for expensive, stateful sessions of an on-device
//! inference engine. The engine exposes translation, rewriting,
//! summarization and language detection through an asynchronous
//! create/destroy surface, plus an availability query that may report the
//! model still has to be downloaded.
//!
//! For each capability a manager keeps at most one live session and:
//!
//! - reuses it while callers keep asking for a structurally equal configuration
//! - probes availability before creating anything, failing fast on `unavailable`
//! - destroys the stale session before installing a replacement
//! - waits for the session's readiness signal (e.g. after a cold download)
//! - notifies cleanup observers when the session is torn down
//!
//! ## Quick Start
//!
//! Bind the engine by implementing [`CapabilityAdapter`] for a capability,
//! then drive it through the matching manager:
//!
//! ```ignore
//! use capability_sessions::{
//!     CapabilityAdapter, ManagerConfig, Result, TranslationManager, TranslatorConfig,
//! };
//!
//! # async fn example(adapter: impl CapabilityAdapter) -> Result<()> {
//! let manager = TranslationManager::new(adapter, ManagerConfig::default());
//!
//! // First call probes availability and creates a session
//! let hola = manager.translate(TranslatorConfig::new("en", "es"), "hello").await?;
//!
//! // Same language pair: the cached session is reused
//! let adios = manager.translate(TranslatorConfig::new("en", "es"), "goodbye").await?;
//!
//! // Release the session
//! manager.cleanup().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`adapter`]: The engine seam (`availability`, `create`, `destroy`, `ready`)
//! - [`availability`]: Availability gating and download monitoring
//! - [`manager`]: The shared `LifecycleManager` and its serialized worker
//! - [`capabilities`]: Typed managers for the four capabilities
//! - [`registry`]: Lazily constructed managers, one per capability kind
//! - [`types`]: Identifiers, configuration and callback types
//! - [`error`]: Error types and handling
//!
//! ## Concurrency
//!
//! Every `get_or_create` and `cleanup` call on a manager is queued to a
//! single background task and handled in order. Two callers racing with
//! different configurations therefore never interleave their
//! destroy/create steps; the request sent last determines the cached
//! session. Dropping a pending call does not cancel the work in flight.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, CapabilityError>`](Result):
//!
//! ```ignore
//! # use capability_sessions::CapabilityError;
//! match manager.translator(config).await {
//!     Ok(session) => { /* ... */ }
//!     Err(CapabilityError::Unavailable { capability }) => {
//!         log::warn!("{capability} is not supported on this device");
//!     }
//!     Err(e) => log::error!("Error: {e}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod availability;
pub mod capabilities;
pub mod error;
pub mod manager;
pub mod registry;
pub mod types;

// Re-export commonly used types for external API
pub use adapter::{CapabilityAdapter, ReadySignal};
pub use availability::{DownloadMonitor, probe};
pub use capabilities::{
    DetectorConfig, LanguageDetection, LanguageDetectionManager, LanguageDetector,
    RewriteOptions, Rewriter, RewriterConfig, RewriterFormat, RewriterLength, RewriterTone,
    RewritingManager, SummarizationManager, SummarizeOptions, Summarizer, SummarizerConfig,
    SummaryFormat, SummaryKind, SummaryLength, TranslationManager, Translator, TranslatorConfig,
};
pub use error::{CapabilityError, Result};
pub use manager::{LifecycleManager, SessionHandle};
pub use registry::{CapabilityManager, CapabilityRegistry};
pub use types::{
    Availability, CapabilityKind, CapabilityName, CapabilitySet, CleanupObserver,
    DownloadProgress, LanguageTag, ManagerConfig, ObserverId, SessionConfig, SessionId,
    cleanup_observer,
};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Language detection capability
//!
//! Detector results are normalized before they reach callers: candidates are
//! ranked by descending confidence and confidences never sum above one.

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::adapter::CapabilityAdapter;
use crate::error::Result;
use crate::manager::{LifecycleManager, SessionHandle};
use crate::registry::CapabilityManager;
use crate::types::capability::CapabilityKind;
use crate::types::config::SessionConfig;
use crate::types::identifiers::{LanguageTag, validate_tags};
use crate::types::observers::{CleanupObserver, ObserverId};
use crate::types::options::ManagerConfig;

/// Options a language detector session is created with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorConfig {
    /// Languages the input is expected to be in (order-sensitive)
    pub expected_input_languages: Vec<LanguageTag>,
}

impl SessionConfig for DetectorConfig {
    fn validate(&self) -> Result<()> {
        validate_tags(&self.expected_input_languages)
    }
}

/// One detection candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDetection {
    /// Detected language
    pub detected_language: LanguageTag,
    /// Confidence in `[0.0, 1.0]`
    pub confidence: f64,
}

impl LanguageDetection {
    /// Create a detection candidate
    pub fn new(language: impl Into<LanguageTag>, confidence: f64) -> Self {
        Self {
            detected_language: language.into(),
            confidence,
        }
    }
}

/// Engine language detector session
pub trait LanguageDetector: Send + Sync + 'static {
    /// Detect the language of `text`
    ///
    /// # Errors
    /// Returns `CapabilityError::Engine` if the engine rejects the input
    fn detect(&self, text: &str) -> impl Future<Output = Result<Vec<LanguageDetection>>> + Send;
}

/// Rank raw detector output
///
/// Drops candidates with non-finite or negative confidence, scales the rest
/// down proportionally if they sum above one, and sorts by descending
/// confidence (ties keep engine order).
#[must_use]
pub fn rank_detections(mut candidates: Vec<LanguageDetection>) -> Vec<LanguageDetection> {
    candidates.retain(|c| c.confidence.is_finite() && c.confidence >= 0.0);

    let total: f64 = candidates.iter().map(|c| c.confidence).sum();
    if total > 1.0 {
        for candidate in &mut candidates {
            candidate.confidence /= total;
        }
    }

    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    candidates
}

/// Lifecycle manager for language detector sessions
pub struct LanguageDetectionManager<A>
where
    A: CapabilityAdapter<Config = DetectorConfig>,
    A::Session: LanguageDetector,
{
    lifecycle: LifecycleManager<A>,
}

impl<A> LanguageDetectionManager<A>
where
    A: CapabilityAdapter<Config = DetectorConfig>,
    A::Session: LanguageDetector,
{
    /// Capability kind managed here
    pub const KIND: CapabilityKind = CapabilityKind::LanguageDetection;

    /// Create a manager driving `adapter`
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime
    #[must_use]
    pub fn new(adapter: A, config: ManagerConfig) -> Self {
        Self {
            lifecycle: LifecycleManager::new(adapter, config),
        }
    }

    /// Get a detector for `config`
    ///
    /// # Errors
    /// See [`LifecycleManager::get_or_create`]
    pub async fn detector(&self, config: DetectorConfig) -> Result<SessionHandle<A::Session>> {
        self.lifecycle.get_or_create(config).await
    }

    /// Detect the language of `text` with the active detector
    ///
    /// Uses the default configuration if no detector has been created yet.
    ///
    /// # Errors
    /// Returns error if the session cannot be obtained or detection fails
    pub async fn detect(&self, text: &str) -> Result<Vec<LanguageDetection>> {
        let detector = self
            .lifecycle
            .get_or_create_current(DetectorConfig::default())
            .await?;
        let candidates = detector.detect(text).await?;
        Ok(rank_detections(candidates))
    }

    /// Most likely language of `text`, if the detector returned any candidate
    ///
    /// # Errors
    /// Returns error if the session cannot be obtained or detection fails
    pub async fn detect_top(&self, text: &str) -> Result<Option<LanguageDetection>> {
        Ok(self.detect(text).await?.into_iter().next())
    }

    /// Whether a detector is ready
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    /// Destroy the detector and notify cleanup observers
    ///
    /// # Errors
    /// Returns error if the lifecycle worker is gone
    pub async fn cleanup(&self) -> Result<()> {
        self.lifecycle.cleanup().await
    }

    /// Register a cleanup observer
    pub fn on_cleanup(&self, observer: CleanupObserver) -> ObserverId {
        self.lifecycle.on_cleanup(observer)
    }

    /// Unregister a cleanup observer
    pub fn off_cleanup(&self, id: ObserverId) -> bool {
        self.lifecycle.off_cleanup(id)
    }

    /// Underlying lifecycle manager
    #[must_use]
    pub const fn lifecycle(&self) -> &LifecycleManager<A> {
        &self.lifecycle
    }
}

impl<A> CapabilityManager for LanguageDetectionManager<A>
where
    A: CapabilityAdapter<Config = DetectorConfig>,
    A::Session: LanguageDetector,
{
    fn static_kind() -> CapabilityKind {
        Self::KIND
    }

    fn kind(&self) -> CapabilityKind {
        Self::KIND
    }

    fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    fn cleanup(&self) -> futures::future::BoxFuture<'_, Result<()>> {
        Box::pin(self.lifecycle.cleanup())
    }
}

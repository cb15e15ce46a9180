//! Translation capability
//!
//! A translator session is bound to one source/target language pair. Asking
//! for a different pair replaces the session.

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::adapter::CapabilityAdapter;
use crate::error::{CapabilityError, Result};
use crate::manager::{LifecycleManager, SessionHandle};
use crate::registry::CapabilityManager;
use crate::types::availability::Availability;
use crate::types::capability::CapabilityKind;
use crate::types::config::SessionConfig;
use crate::types::identifiers::LanguageTag;
use crate::types::observers::{CleanupObserver, ObserverId};
use crate::types::options::ManagerConfig;

/// Language pair a translator session is created for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatorConfig {
    /// Language of the input text
    pub source_language: LanguageTag,
    /// Language to translate into
    pub target_language: LanguageTag,
}

impl TranslatorConfig {
    /// Create a config for the `source` → `target` pair
    pub fn new(source: impl Into<LanguageTag>, target: impl Into<LanguageTag>) -> Self {
        Self {
            source_language: source.into(),
            target_language: target.into(),
        }
    }
}

impl SessionConfig for TranslatorConfig {
    fn validate(&self) -> Result<()> {
        self.source_language.validate()?;
        self.target_language.validate()?;
        if self.source_language == self.target_language {
            return Err(CapabilityError::configuration(format!(
                "source and target language are both '{}'",
                self.source_language
            )));
        }
        Ok(())
    }
}

/// Engine translator session
pub trait Translator: Send + Sync + 'static {
    /// Translate `text` from the session's source to its target language
    ///
    /// # Errors
    /// Returns `CapabilityError::Engine` if the engine rejects the input
    fn translate(&self, text: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Lifecycle manager for translator sessions
pub struct TranslationManager<A>
where
    A: CapabilityAdapter<Config = TranslatorConfig>,
    A::Session: Translator,
{
    lifecycle: LifecycleManager<A>,
}

impl<A> TranslationManager<A>
where
    A: CapabilityAdapter<Config = TranslatorConfig>,
    A::Session: Translator,
{
    /// Capability kind managed here
    pub const KIND: CapabilityKind = CapabilityKind::Translation;

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

    /// Get a translator for the `config` language pair
    ///
    /// # Errors
    /// See [`LifecycleManager::get_or_create`]
    pub async fn translator(&self, config: TranslatorConfig) -> Result<SessionHandle<A::Session>> {
        self.lifecycle.get_or_create(config).await
    }

    /// Translate `text` with the translator for `config`
    ///
    /// Empty input is returned as-is without creating a session.
    ///
    /// # Errors
    /// Returns error if the session cannot be obtained or translation fails
    pub async fn translate(&self, config: TranslatorConfig, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        let translator = self.translator(config).await?;
        translator.translate(text).await
    }

    /// Query availability of a language pair without creating a session
    ///
    /// # Errors
    /// Returns error if the pair is malformed or the engine cannot answer
    pub async fn availability(&self, config: &TranslatorConfig) -> Result<Availability> {
        config.validate()?;
        self.lifecycle.availability(config).await
    }

    /// Language pair of the cached translator
    #[must_use]
    pub fn current_language_pair(&self) -> Option<TranslatorConfig> {
        self.lifecycle.current_config()
    }

    /// Whether a translator is ready
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    /// Destroy the translator and notify cleanup observers
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

impl<A> CapabilityManager for TranslationManager<A>
where
    A: CapabilityAdapter<Config = TranslatorConfig>,
    A::Session: Translator,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_identical_pair() {
        let err = TranslatorConfig::new("en", "en").validate().unwrap_err();
        assert!(matches!(err, CapabilityError::Configuration(_)));
    }

    #[test]
    fn test_validate_rejects_malformed_tag() {
        assert!(TranslatorConfig::new("en", "").validate().is_err());
        assert!(TranslatorConfig::new("en", "es-419").validate().is_ok());
    }

    #[test]
    fn test_serde_camel_case() {
        let config = TranslatorConfig::new("en", "ja");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json, serde_json::json!({"sourceLanguage": "en", "targetLanguage": "ja"}));
    }
}

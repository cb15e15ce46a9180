//! Rewriting capability
//!
//! A rewriter session is created for a fixed tone, format, length and
//! shared context. `set_options` swaps the session when any of them change;
//! `current_options` hands out a copy so callers cannot mutate the cached
//! configuration behind the manager's back.

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

/// Tone of the rewritten text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriterTone {
    /// Keep the original tone
    #[default]
    AsIs,
    /// More formal
    MoreFormal,
    /// More casual
    MoreCasual,
}

/// Output format of the rewritten text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriterFormat {
    /// Keep the original format
    #[default]
    AsIs,
    /// Plain text
    PlainText,
    /// Markdown
    Markdown,
}

/// Length of the rewritten text relative to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriterLength {
    /// Keep the original length
    #[default]
    AsIs,
    /// Shorter
    Shorter,
    /// Longer
    Longer,
}

/// Options a rewriter session is created with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewriterConfig {
    /// Context shared by every rewrite performed with the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_context: Option<String>,
    /// Target tone
    pub tone: RewriterTone,
    /// Target format
    pub format: RewriterFormat,
    /// Target length
    pub length: RewriterLength,
    /// Languages the input is expected to be in (order-sensitive)
    pub expected_input_languages: Vec<LanguageTag>,
    /// Languages the per-call context is expected to be in (order-sensitive)
    pub expected_context_languages: Vec<LanguageTag>,
    /// Language of the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_language: Option<LanguageTag>,
}

impl RewriterConfig {
    /// Set the target tone
    #[must_use]
    pub const fn with_tone(mut self, tone: RewriterTone) -> Self {
        self.tone = tone;
        self
    }

    /// Set the target format
    #[must_use]
    pub const fn with_format(mut self, format: RewriterFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the target length
    #[must_use]
    pub const fn with_length(mut self, length: RewriterLength) -> Self {
        self.length = length;
        self
    }

    /// Set the shared context
    #[must_use]
    pub fn with_shared_context(mut self, context: impl Into<String>) -> Self {
        self.shared_context = Some(context.into());
        self
    }
}

impl SessionConfig for RewriterConfig {
    fn validate(&self) -> Result<()> {
        validate_tags(&self.expected_input_languages)?;
        validate_tags(&self.expected_context_languages)?;
        if let Some(output) = &self.output_language {
            output.validate()?;
        }
        Ok(())
    }
}

/// Per-call rewrite options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOptions {
    /// Extra context for this call only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Engine rewriter session
pub trait Rewriter: Send + Sync + 'static {
    /// Rewrite `text` according to the session's options
    ///
    /// # Errors
    /// Returns `CapabilityError::Engine` if the engine rejects the input
    fn rewrite(
        &self,
        text: &str,
        options: &RewriteOptions,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Lifecycle manager for rewriter sessions
pub struct RewritingManager<A>
where
    A: CapabilityAdapter<Config = RewriterConfig>,
    A::Session: Rewriter,
{
    lifecycle: LifecycleManager<A>,
}

impl<A> RewritingManager<A>
where
    A: CapabilityAdapter<Config = RewriterConfig>,
    A::Session: Rewriter,
{
    /// Capability kind managed here
    pub const KIND: CapabilityKind = CapabilityKind::Rewriting;

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

    /// Get a rewriter for `config`
    ///
    /// # Errors
    /// See [`LifecycleManager::get_or_create`]
    pub async fn get_or_create(&self, config: RewriterConfig) -> Result<SessionHandle<A::Session>> {
        self.lifecycle.get_or_create(config).await
    }

    /// Switch the active rewriter options
    ///
    /// Equivalent to [`RewritingManager::get_or_create`]; the options become
    /// visible through [`RewritingManager::current_options`] once the session
    /// is ready.
    ///
    /// # Errors
    /// See [`LifecycleManager::get_or_create`]
    pub async fn set_options(&self, config: RewriterConfig) -> Result<SessionHandle<A::Session>> {
        self.get_or_create(config).await
    }

    /// Copy of the active rewriter options
    #[must_use]
    pub fn current_options(&self) -> Option<RewriterConfig> {
        self.lifecycle.current_config()
    }

    /// Rewrite `text` with the active options, or the defaults if none are set
    ///
    /// # Errors
    /// Returns error if the session cannot be obtained or the rewrite fails
    pub async fn rewrite(&self, text: &str, options: &RewriteOptions) -> Result<String> {
        let rewriter = self
            .lifecycle
            .get_or_create_current(RewriterConfig::default())
            .await?;
        rewriter.rewrite(text, options).await
    }

    /// Whether a rewriter is ready
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    /// Destroy the rewriter and notify cleanup observers
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

impl<A> CapabilityManager for RewritingManager<A>
where
    A: CapabilityAdapter<Config = RewriterConfig>,
    A::Session: Rewriter,
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

//! Summarization capability
//!
//! Summarizer sessions are content-agnostic: the default configuration is
//! enough for any input, and the optional fields only shape the output.
//! Summaries are available both buffered and as a stream of chunks.

use async_stream::try_stream;
use futures::StreamExt;
use futures::stream::{BoxStream, Stream};
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

/// Kind of summary produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryKind {
    /// Short overview
    #[default]
    #[serde(rename = "tldr")]
    TlDr,
    /// Bulleted key points
    KeyPoints,
    /// Enticing teaser
    Teaser,
    /// Single headline
    Headline,
}

/// Output format of a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryFormat {
    /// Plain text
    PlainText,
    /// Markdown
    #[default]
    Markdown,
}

/// Length of a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryLength {
    /// Short
    #[default]
    Short,
    /// Medium
    Medium,
    /// Long
    Long,
}

/// Options a summarizer session is created with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummarizerConfig {
    /// Context shared by every summary produced with the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_context: Option<String>,
    /// Summary kind
    #[serde(rename = "type")]
    pub kind: SummaryKind,
    /// Output format
    pub format: SummaryFormat,
    /// Output length
    pub length: SummaryLength,
    /// Languages the input is expected to be in (order-sensitive)
    pub expected_input_languages: Vec<LanguageTag>,
    /// Language of the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_language: Option<LanguageTag>,
}

impl SessionConfig for SummarizerConfig {
    fn validate(&self) -> Result<()> {
        validate_tags(&self.expected_input_languages)?;
        if let Some(output) = &self.output_language {
            output.validate()?;
        }
        Ok(())
    }
}

/// Per-call summarize options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeOptions {
    /// Extra context for this call only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Engine summarizer session
pub trait Summarizer: Send + Sync + 'static {
    /// Summarize `text` in one piece
    ///
    /// # Errors
    /// Returns `CapabilityError::Engine` if the engine rejects the input
    fn summarize(
        &self,
        text: &str,
        options: &SummarizeOptions,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Summarize `text` as a finite, single-pass stream of chunks
    ///
    /// Each call starts a fresh engine run.
    fn summarize_streaming(
        &self,
        text: &str,
        options: &SummarizeOptions,
    ) -> BoxStream<'static, Result<String>>;
}

/// Lifecycle manager for summarizer sessions
pub struct SummarizationManager<A>
where
    A: CapabilityAdapter<Config = SummarizerConfig>,
    A::Session: Summarizer,
{
    lifecycle: LifecycleManager<A>,
}

impl<A> SummarizationManager<A>
where
    A: CapabilityAdapter<Config = SummarizerConfig>,
    A::Session: Summarizer,
{
    /// Capability kind managed here
    pub const KIND: CapabilityKind = CapabilityKind::Summarization;

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

    /// Get a summarizer for `config`
    ///
    /// # Errors
    /// See [`LifecycleManager::get_or_create`]
    pub async fn summarizer(&self, config: SummarizerConfig) -> Result<SessionHandle<A::Session>> {
        self.lifecycle.get_or_create(config).await
    }

    /// Summarizer for the active configuration, or the default one
    async fn active_summarizer(&self) -> Result<SessionHandle<A::Session>> {
        self.lifecycle
            .get_or_create_current(SummarizerConfig::default())
            .await
    }

    /// Summarize `text` with the active summarizer
    ///
    /// # Errors
    /// Returns error if the session cannot be obtained or summarization fails
    pub async fn summarize(&self, text: &str, options: &SummarizeOptions) -> Result<String> {
        let summarizer = self.active_summarizer().await?;
        summarizer.summarize(text, options).await
    }

    /// Summarize `text` as a stream of chunks
    ///
    /// The session is obtained when the stream is first polled. The stream is
    /// single-pass; call again to summarize again.
    pub fn summarize_streaming<'a>(
        &'a self,
        text: &'a str,
        options: &'a SummarizeOptions,
    ) -> impl Stream<Item = Result<String>> + Send + 'a {
        try_stream! {
            let summarizer = self.active_summarizer().await?;
            let mut chunks = summarizer.summarize_streaming(text, options);
            while let Some(chunk) = chunks.next().await {
                yield chunk?;
            }
        }
    }

    /// Copy of the active summarizer configuration
    #[must_use]
    pub fn current_config(&self) -> Option<SummarizerConfig> {
        self.lifecycle.current_config()
    }

    /// Whether a summarizer is ready
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    /// Destroy the summarizer and notify cleanup observers
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

impl<A> CapabilityManager for SummarizationManager<A>
where
    A: CapabilityAdapter<Config = SummarizerConfig>,
    A::Session: Summarizer,
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
    fn test_default_config_is_valid() {
        assert!(SummarizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let config = SummarizerConfig {
            kind: SummaryKind::KeyPoints,
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "key-points");
        assert_eq!(json["format"], "markdown");
    }

    #[test]
    fn test_empty_json_is_default() {
        let parsed: SummarizerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, SummarizerConfig::default());
    }
}

//! Concrete capability managers
//!
//! Each capability pairs a typed session configuration with an engine
//! session trait and a manager wrapping [`crate::manager::LifecycleManager`]:
//!
//! - [`translation`] - `TranslationManager` over [`translation::Translator`] sessions
//! - [`rewriting`] - `RewritingManager` over [`rewriting::Rewriter`] sessions
//! - [`summarization`] - `SummarizationManager` over [`summarization::Summarizer`] sessions
//! - [`language_detection`] - `LanguageDetectionManager` over
//!   [`language_detection::LanguageDetector`] sessions

pub mod language_detection;
pub mod rewriting;
pub mod summarization;
pub mod translation;

pub use language_detection::{
    DetectorConfig, LanguageDetection, LanguageDetectionManager, LanguageDetector,
    rank_detections,
};
pub use rewriting::{
    RewriteOptions, Rewriter, RewriterConfig, RewriterFormat, RewriterLength, RewriterTone,
    RewritingManager,
};
pub use summarization::{
    SummarizationManager, SummarizeOptions, Summarizer, SummarizerConfig, SummaryFormat,
    SummaryKind, SummaryLength,
};
pub use translation::{TranslationManager, Translator, TranslatorConfig};

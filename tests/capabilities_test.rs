//! Integration tests for the typed capability managers

mod common;

use std::time::Duration;

use futures::TryStreamExt;

use capability_sessions::{
    Availability, CapabilityError, DetectorConfig, LanguageDetectionManager, ManagerConfig,
    RewriteOptions, RewriterConfig, RewriterFormat, RewriterTone, RewritingManager,
    SummarizationManager, SummarizeOptions, SummarizerConfig, SummaryKind, TranslationManager,
    TranslatorConfig,
};
use common::{EngineLog, MockAdapter, init_logging};

type MockTranslation = TranslationManager<MockAdapter<TranslatorConfig>>;
type MockRewriting = RewritingManager<MockAdapter<RewriterConfig>>;
type MockSummarization = SummarizationManager<MockAdapter<SummarizerConfig>>;
type MockDetection = LanguageDetectionManager<MockAdapter<DetectorConfig>>;

fn translation(log: &EngineLog) -> MockTranslation {
    TranslationManager::new(MockAdapter::new("translator", log), ManagerConfig::default())
}

fn rewriting(log: &EngineLog) -> MockRewriting {
    RewritingManager::new(MockAdapter::new("rewriter", log), ManagerConfig::default())
}

fn summarization(log: &EngineLog) -> MockSummarization {
    SummarizationManager::new(MockAdapter::new("summarizer", log), ManagerConfig::default())
}

fn detection(log: &EngineLog) -> MockDetection {
    LanguageDetectionManager::new(
        MockAdapter::new("languageDetector", log),
        ManagerConfig::default(),
    )
}

#[tokio::test]
async fn test_translate_reuses_session_per_language_pair() {
    init_logging();
    let log = EngineLog::new();
    let manager = translation(&log);
    let pair = TranslatorConfig::new("en", "es");

    let hola = manager.translate(pair.clone(), "hello").await.unwrap();
    let adios = manager.translate(pair.clone(), "goodbye").await.unwrap();

    assert_eq!(hola, "1<hello>");
    assert_eq!(adios, "1<goodbye>");
    assert_eq!(log.created_count(), 1);
    assert_eq!(manager.current_language_pair(), Some(pair));

    let bonjour = manager
        .translate(TranslatorConfig::new("en", "fr"), "hello")
        .await
        .unwrap();
    assert_eq!(bonjour, "2<hello>");
    assert_eq!(log.destroyed(), vec![1]);
}

#[tokio::test]
async fn test_blank_translation_skips_engine() {
    let log = EngineLog::new();
    let manager = translation(&log);

    let out = manager
        .translate(TranslatorConfig::new("en", "es"), "   ")
        .await
        .unwrap();

    assert_eq!(out, "   ");
    assert_eq!(log.probes(), 0);
    assert!(!manager.is_ready());
}

#[tokio::test]
async fn test_translation_availability_does_not_create() {
    let log = EngineLog::new();
    log.configure(|s| s.availability = Some(Availability::Downloadable));
    let manager = translation(&log);

    let availability = manager
        .availability(&TranslatorConfig::new("en", "ja"))
        .await
        .unwrap();

    assert_eq!(availability, Availability::Downloadable);
    assert_eq!(log.created_count(), 0);

    let err = manager
        .availability(&TranslatorConfig::new("en", "e n"))
        .await
        .unwrap_err();
    assert!(matches!(err, CapabilityError::Configuration(_)));
    assert_eq!(log.probes(), 1);
}

#[tokio::test]
async fn test_rewrite_uses_active_options() {
    init_logging();
    let log = EngineLog::new();
    let manager = rewriting(&log);

    // No options yet: the default rewriter is created
    let plain = manager.rewrite("hi", &RewriteOptions::default()).await.unwrap();
    assert_eq!(plain, "1:hi");
    assert_eq!(manager.current_options(), Some(RewriterConfig::default()));

    let formal = RewriterConfig::default()
        .with_tone(RewriterTone::MoreFormal)
        .with_format(RewriterFormat::PlainText);
    manager.set_options(formal.clone()).await.unwrap();

    let options = RewriteOptions {
        context: Some("email".to_string()),
    };
    let rewritten = manager.rewrite("hi", &options).await.unwrap();

    assert_eq!(rewritten, "2(email):hi");
    assert_eq!(manager.current_options(), Some(formal));
    assert_eq!(log.created_count(), 2);
}

#[tokio::test]
async fn test_rewrite_queued_behind_option_change_uses_new_options() {
    let log = EngineLog::new();
    let manager = rewriting(&log);
    let casual = RewriterConfig::default().with_tone(RewriterTone::MoreCasual);
    let formal = RewriterConfig::default().with_tone(RewriterTone::MoreFormal);
    manager.set_options(casual).await.unwrap();
    log.configure(|s| s.create_delay = Some(Duration::from_millis(10)));

    let rewrite_options = RewriteOptions::default();
    let (switched, rewritten) = tokio::join!(
        manager.set_options(formal.clone()),
        manager.rewrite("hi", &rewrite_options)
    );

    let formal_session = switched.unwrap();
    assert_eq!(rewritten.unwrap(), format!("{}:hi", formal_session.serial));
    assert_eq!(manager.current_options(), Some(formal));
    assert_eq!(log.created_count(), 2);
    assert_eq!(log.destroyed(), vec![1]);
}

#[tokio::test]
async fn test_summary_queued_behind_config_change_uses_new_config() {
    let log = EngineLog::new();
    log.configure(|s| s.create_delay = Some(Duration::from_millis(10)));
    let manager = summarization(&log);
    let teaser = SummarizerConfig {
        kind: SummaryKind::Teaser,
        ..SummarizerConfig::default()
    };

    let summarize_options = SummarizeOptions::default();
    let (created, summary) = tokio::join!(
        manager.summarizer(teaser.clone()),
        manager.summarize("one two three four", &summarize_options)
    );

    created.unwrap();
    assert_eq!(summary.unwrap(), "one two three");
    assert_eq!(manager.current_config(), Some(teaser));
    assert_eq!(log.created_count(), 1);
    assert!(log.destroyed().is_empty());
}

#[tokio::test]
async fn test_current_options_is_a_copy() {
    let log = EngineLog::new();
    let manager = rewriting(&log);
    let casual = RewriterConfig::default().with_tone(RewriterTone::MoreCasual);
    manager.get_or_create(casual.clone()).await.unwrap();

    let mut copy = manager.current_options().unwrap();
    copy.tone = RewriterTone::MoreFormal;

    assert_eq!(manager.current_options(), Some(casual.clone()));
    // The cached session still matches the original options
    manager.get_or_create(casual).await.unwrap();
    assert_eq!(log.created_count(), 1);
}

#[tokio::test]
async fn test_rewriter_shared_context_change_recreates() {
    let log = EngineLog::new();
    let manager = rewriting(&log);

    manager
        .get_or_create(RewriterConfig::default().with_shared_context("blog"))
        .await
        .unwrap();
    manager
        .get_or_create(RewriterConfig::default().with_shared_context("email"))
        .await
        .unwrap();

    assert_eq!(log.created_count(), 2);
    assert_eq!(log.destroyed(), vec![1]);
}

#[tokio::test]
async fn test_summarize_with_default_config() {
    let log = EngineLog::new();
    let manager = summarization(&log);

    let summary = manager
        .summarize("one two three four five", &SummarizeOptions::default())
        .await
        .unwrap();

    assert_eq!(summary, "one two three");
    assert_eq!(manager.current_config(), Some(SummarizerConfig::default()));
}

#[tokio::test]
async fn test_streaming_summary_runs_engine_per_call() {
    let log = EngineLog::new();
    let manager = summarization(&log);
    let headline = SummarizerConfig {
        kind: SummaryKind::Headline,
        ..SummarizerConfig::default()
    };
    manager.summarizer(headline.clone()).await.unwrap();

    let options = SummarizeOptions::default();
    let first: Vec<String> = manager
        .summarize_streaming("alpha beta gamma delta", &options)
        .try_collect()
        .await
        .unwrap();
    let second: Vec<String> = manager
        .summarize_streaming("alpha beta gamma delta", &options)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(first, vec!["alpha ", "beta ", "gamma "]);
    assert_eq!(first, second);
    assert_eq!(log.read(|s| s.stream_runs), 2);
    assert_eq!(log.created_count(), 1);
    assert_eq!(manager.current_config(), Some(headline));
}

#[tokio::test]
async fn test_streaming_summary_surfaces_unavailable() {
    let log = EngineLog::new();
    log.configure(|s| s.availability = Some(Availability::Unavailable));
    let manager = summarization(&log);

    let options = SummarizeOptions::default();
    let result: Result<Vec<String>, _> = manager
        .summarize_streaming("alpha beta", &options)
        .try_collect()
        .await;

    assert!(result.unwrap_err().is_unavailable());
    assert_eq!(log.read(|s| s.stream_runs), 0);
}

#[tokio::test]
async fn test_detection_is_ranked_and_normalized() {
    let log = EngineLog::new();
    let manager = detection(&log);

    let ranked = manager.detect("bonjour hello").await.unwrap();

    let languages: Vec<&str> = ranked.iter().map(|d| d.detected_language.as_str()).collect();
    assert_eq!(languages, vec!["en", "fr"]);
    assert!((ranked[0].confidence - 0.75).abs() < 1e-9);
    assert!((ranked[1].confidence - 0.25).abs() < 1e-9);

    let top = manager.detect_top("hello").await.unwrap().unwrap();
    assert_eq!(top.detected_language.as_str(), "en");
    assert_eq!(log.created_count(), 1);
}

#[tokio::test]
async fn test_detection_engine_error_keeps_session() {
    let log = EngineLog::new();
    let manager = detection(&log);
    manager
        .detector(DetectorConfig {
            expected_input_languages: vec!["en".into(), "fr".into()],
        })
        .await
        .unwrap();

    let err = manager.detect("").await.unwrap_err();

    assert!(matches!(err, CapabilityError::Engine { .. }));
    assert!(manager.is_ready());
    assert_eq!(log.created_count(), 1);
}

//! Scriptable in-memory engine shared by the integration tests
//!
//! `MockAdapter<C>` binds any session config type to `MockSession`, which
//! implements all four capability session traits. Every engine call is
//! recorded in the shared `EngineLog`.

#![allow(dead_code)]

use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use capability_sessions::{
    Availability, CapabilityAdapter, CapabilityError, CapabilityName, DownloadMonitor,
    LanguageDetection, LanguageDetector, ReadySignal, Result, RewriteOptions, Rewriter,
    SessionConfig, SummarizeOptions, Summarizer, Translator,
};

/// Initialize test logging once
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Knobs and counters of the mock engine
#[derive(Default)]
pub struct EngineState {
    pub availability: Option<Availability>,
    pub fail_availability: bool,
    pub fail_create: bool,
    pub fail_ready: bool,
    pub fail_destroy: bool,
    pub ready_gate: Option<Arc<Notify>>,
    pub create_delay: Option<Duration>,
    pub download_steps: Vec<f64>,

    pub probes: usize,
    pub created: Vec<u64>,
    pub created_configs: Vec<String>,
    pub destroyed: Vec<u64>,
    pub in_flight: usize,
    pub max_in_flight: usize,
    pub stream_runs: usize,
    next_serial: u64,
}

/// Shared handle to the engine state
#[derive(Clone, Default)]
pub struct EngineLog {
    inner: Arc<Mutex<EngineState>>,
}

impl EngineLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&self, f: impl FnOnce(&mut EngineState)) {
        f(&mut self.inner.lock());
    }

    pub fn read<T>(&self, f: impl FnOnce(&EngineState) -> T) -> T {
        f(&self.inner.lock())
    }

    pub fn created_count(&self) -> usize {
        self.read(|s| s.created.len())
    }

    pub fn destroyed(&self) -> Vec<u64> {
        self.read(|s| s.destroyed.clone())
    }

    pub fn probes(&self) -> usize {
        self.read(|s| s.probes)
    }

    /// Sessions created and not yet destroyed
    pub fn live_sessions(&self) -> usize {
        self.read(|s| {
            s.created
                .iter()
                .filter(|serial| !s.destroyed.contains(serial))
                .count()
        })
    }
}

/// Engine session created by `MockAdapter`
pub struct MockSession {
    pub serial: u64,
    pub config: String,
    log: EngineLog,
}

impl Translator for MockSession {
    async fn translate(&self, text: &str) -> Result<String> {
        Ok(format!("{}<{text}>", self.serial))
    }
}

impl Rewriter for MockSession {
    async fn rewrite(&self, text: &str, options: &RewriteOptions) -> Result<String> {
        match &options.context {
            Some(context) => Ok(format!("{}({context}):{text}", self.serial)),
            None => Ok(format!("{}:{text}", self.serial)),
        }
    }
}

impl Summarizer for MockSession {
    async fn summarize(&self, text: &str, _options: &SummarizeOptions) -> Result<String> {
        Ok(text.split_whitespace().take(3).collect::<Vec<_>>().join(" "))
    }

    fn summarize_streaming(
        &self,
        text: &str,
        _options: &SummarizeOptions,
    ) -> BoxStream<'static, Result<String>> {
        self.log.configure(|s| s.stream_runs += 1);
        let chunks: Vec<Result<String>> = text
            .split_whitespace()
            .take(3)
            .map(|word| Ok(format!("{word} ")))
            .collect();
        stream::iter(chunks).boxed()
    }
}

impl LanguageDetector for MockSession {
    async fn detect(&self, text: &str) -> Result<Vec<LanguageDetection>> {
        if text.is_empty() {
            return Err(CapabilityError::engine("languageDetector", "empty input"));
        }
        Ok(vec![
            LanguageDetection::new("fr", 0.3),
            LanguageDetection::new("en", 0.9),
            LanguageDetection::new("de", f64::NAN),
        ])
    }
}

/// Adapter binding config type `C` to the mock engine
pub struct MockAdapter<C> {
    name: &'static str,
    log: EngineLog,
    _config: PhantomData<fn() -> C>,
}

impl<C> MockAdapter<C> {
    pub fn new(name: &'static str, log: &EngineLog) -> Self {
        Self {
            name,
            log: log.clone(),
            _config: PhantomData,
        }
    }
}

impl<C: SessionConfig> CapabilityAdapter for MockAdapter<C> {
    type Config = C;
    type Session = MockSession;

    fn capability(&self) -> CapabilityName {
        CapabilityName::new(self.name)
    }

    async fn availability(&self, _config: &C) -> Result<Availability> {
        let mut state = self.log.inner.lock();
        state.probes += 1;
        if state.fail_availability {
            return Err(CapabilityError::engine(self.name, "availability query failed"));
        }
        Ok(state.availability.unwrap_or(Availability::Available))
    }

    async fn create(&self, config: &C, monitor: DownloadMonitor) -> Result<MockSession> {
        let (delay, steps, fail) = {
            let mut state = self.log.inner.lock();
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            (
                state.create_delay,
                state.download_steps.clone(),
                state.fail_create,
            )
        };

        for step in steps {
            monitor.report(step);
        }
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.log.inner.lock();
        state.in_flight -= 1;
        if fail {
            return Err(CapabilityError::engine(self.name, "model failed to load"));
        }
        state.next_serial += 1;
        let serial = state.next_serial;
        state.created.push(serial);
        state.created_configs.push(format!("{config:?}"));
        Ok(MockSession {
            serial,
            config: format!("{config:?}"),
            log: self.log.clone(),
        })
    }

    async fn destroy(&self, session: &MockSession) -> Result<()> {
        let mut state = self.log.inner.lock();
        state.destroyed.push(session.serial);
        if state.fail_destroy {
            return Err(CapabilityError::engine(self.name, "destroy failed"));
        }
        Ok(())
    }

    fn ready(&self, _session: &MockSession) -> Option<ReadySignal> {
        let state = self.log.inner.lock();
        let gate = state.ready_gate.clone()?;
        let fail = state.fail_ready;
        let name = self.name;
        Some(Box::pin(async move {
            gate.notified().await;
            if fail {
                Err(CapabilityError::engine(name, "model download aborted"))
            } else {
                Ok(())
            }
        }))
    }
}

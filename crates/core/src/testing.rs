// SPDX-License-Identifier: MIT

//! Shared test doubles for crate-internal tests

use crate::job::{Job, Parameters};
use crate::listener::JobListener;
use crate::metadata::JobMetadata;
use crate::result::JobResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a `TestJob` should do when run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestBehavior {
    Succeed,
    Fail,
    Panic,
}

/// A scriptable job that records its executions
pub struct TestJob {
    metadata: JobMetadata,
    behavior: TestBehavior,
    delay: Option<Duration>,
    run_count: AtomicUsize,
    /// Shared execution log, ordered by completion
    log: Arc<Mutex<Vec<String>>>,
    seen_params: Mutex<Vec<Parameters>>,
}

impl TestJob {
    pub fn new(name: &str) -> Self {
        Self {
            metadata: JobMetadata::new(name),
            behavior: TestBehavior::Succeed,
            delay: None,
            run_count: AtomicUsize::new(0),
            log: Arc::new(Mutex::new(Vec::new())),
            seen_params: Mutex::new(Vec::new()),
        }
    }

    pub fn with_metadata(mut self, metadata: JobMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn failing(mut self) -> Self {
        self.behavior = TestBehavior::Fail;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.behavior = TestBehavior::Panic;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_log(mut self, log: Arc<Mutex<Vec<String>>>) -> Self {
        self.log = log;
        self
    }

    pub fn run_count(&self) -> usize {
        self.run_count.load(Ordering::SeqCst)
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Parameters seen by the most recent run
    pub fn last_params(&self) -> Option<Parameters> {
        self.seen_params
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

#[async_trait]
impl Job for TestJob {
    fn metadata(&self) -> &JobMetadata {
        &self.metadata
    }

    async fn run(&self, parameters: Parameters) -> JobResult {
        self.run_count.fetch_add(1, Ordering::SeqCst);
        self.seen_params
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(parameters);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let name = self.metadata.name().to_string();
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(name.clone());

        match self.behavior {
            TestBehavior::Succeed => JobResult::success(name),
            TestBehavior::Fail => JobResult::failure(name, "scripted failure"),
            TestBehavior::Panic => panic!("scripted panic in {name}"),
        }
    }
}

/// Listener that records lifecycle callbacks in order
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl JobListener for RecordingListener {
    fn on_start(&self, job_name: &str, _parameters: &Parameters) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(format!("start:{job_name}"));
    }

    fn on_finish(&self, job_name: &str, result: &JobResult) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(format!("finish:{job_name}:{}", result.outcome()));
    }
}

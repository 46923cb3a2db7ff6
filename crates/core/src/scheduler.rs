// SPDX-License-Identifier: MIT

//! Scheduler: bounded worker pool, interval triggers, and the run path
//! that ties registry resolution to lock-handled execution
//!
//! The trigger queue is a min-heap polled against the clock; due
//! triggers re-arm themselves and dispatch through `run_job`, which
//! resolves the execution unit and guards it with the lock handler
//! configured for that name.

use crate::clock::Clock;
use crate::definition::LockType;
use crate::graph::RegistryError;
use crate::job::{Job, Parameters};
use crate::lock::LockHandler;
use crate::registry::JobRegistry;
use crate::result::JobResult;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("no lock handler registered for lock type '{0}'")]
    MissingHandler(LockType),
}

/// Bounded pool of job workers.
///
/// Concurrency is limited by a semaphore; a spawned job waits for a
/// permit before it runs, so a group can dispatch a whole level without
/// exceeding the worker budget.
#[derive(Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Spawn a job onto the pool. The handle resolves to the job's
    /// result; a panicking job surfaces as a panicked handle, which
    /// callers translate into a failed result.
    pub fn spawn(&self, job: Arc<dyn Job>, parameters: Parameters) -> JoinHandle<JobResult> {
        let permits = self.permits.clone();
        tokio::spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return JobResult::failure(job.metadata().name(), "worker pool is shut down")
                }
            };
            job.run(parameters).await
        })
    }
}

/// A recurring trigger for a named job or group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub job: String,
    #[serde(with = "humantime_serde")]
    pub every: Duration,
    #[serde(default)]
    pub params: Parameters,
}

impl Trigger {
    pub fn new(job: impl Into<String>, every: Duration) -> Self {
        Self {
            job: job.into(),
            every,
            params: Parameters::new(),
        }
    }

    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }
}

#[derive(Clone, Debug)]
struct ArmedTrigger {
    fire_at: Instant,
    trigger: Trigger,
}

impl PartialEq for ArmedTrigger {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.trigger.job == other.trigger.job
    }
}

impl Eq for ArmedTrigger {}

impl PartialOrd for ArmedTrigger {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArmedTrigger {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest first
        Reverse(self.fire_at).cmp(&Reverse(other.fire_at))
    }
}

/// Holds armed triggers and yields the ones that are due
#[derive(Default)]
pub struct TriggerQueue {
    items: BinaryHeap<ArmedTrigger>,
    cancelled: HashSet<String>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a trigger; it first fires one interval from `now`. Arming
    /// clears any standing cancellation for the name.
    pub fn arm(&mut self, trigger: Trigger, now: Instant) {
        self.cancelled.remove(&trigger.job);
        self.items.push(ArmedTrigger {
            fire_at: now + trigger.every,
            trigger,
        });
    }

    /// Cancel all future fires for a job name. Stands until the name is
    /// armed again.
    pub fn cancel(&mut self, job: &str) {
        self.cancelled.insert(job.to_string());
    }

    /// Pop every trigger due at or before `now`, re-arming each for its
    /// next interval past `now`. Intervals missed while nobody polled
    /// collapse into the single due fire rather than firing in a burst.
    pub fn poll(&mut self, now: Instant) -> Vec<Trigger> {
        let mut due = Vec::new();

        while let Some(item) = self.items.peek() {
            if item.fire_at > now {
                break;
            }
            let Some(item) = self.items.pop() else {
                break;
            };

            if self.cancelled.contains(&item.trigger.job) {
                continue;
            }

            let mut fire_at = item.fire_at + item.trigger.every;
            while fire_at <= now {
                fire_at += item.trigger.every;
            }
            self.items.push(ArmedTrigger {
                fire_at,
                trigger: item.trigger.clone(),
            });
            due.push(item.trigger);
        }

        due
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next_fire_time(&self) -> Option<Instant> {
        self.items.peek().map(|item| item.fire_at)
    }
}

/// Owns the registry, the worker pool, the lock-handler table, and the
/// trigger queue
pub struct Scheduler<C: Clock> {
    registry: Arc<JobRegistry>,
    handlers: HashMap<LockType, Arc<dyn LockHandler>>,
    triggers: Mutex<TriggerQueue>,
    clock: C,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(
        registry: Arc<JobRegistry>,
        handlers: HashMap<LockType, Arc<dyn LockHandler>>,
        clock: C,
    ) -> Self {
        Self {
            registry,
            handlers,
            triggers: Mutex::new(TriggerQueue::new()),
            clock,
        }
    }

    pub fn registry(&self) -> &Arc<JobRegistry> {
        &self.registry
    }

    /// Resolve a name and run it under its configured lock
    pub async fn run_job(
        &self,
        name: &str,
        parameters: Parameters,
    ) -> Result<JobResult, SchedulerError> {
        let execution = self.registry.job(name)?;
        let lock_type = self.registry.lock_type(name);
        let handler = self
            .handlers
            .get(&lock_type)
            .ok_or(SchedulerError::MissingHandler(lock_type))?;

        tracing::debug!(job = name, lock = %lock_type, "dispatching job");
        Ok(handler.run_exclusively(name, execution, parameters).await)
    }

    /// Arm a recurring trigger
    pub fn schedule(&self, trigger: Trigger) {
        let now = self.clock.now();
        tracing::info!(job = %trigger.job, every = ?trigger.every, "trigger armed");
        self.triggers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .arm(trigger, now);
    }

    /// Cancel future fires for a job name
    pub fn cancel(&self, job: &str) {
        self.triggers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .cancel(job);
    }

    pub fn next_fire_time(&self) -> Option<Instant> {
        self.triggers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .next_fire_time()
    }

    /// Dispatch every due trigger onto its own task; returns the
    /// handles so callers (and tests) can await completion
    pub fn tick(self: &Arc<Self>) -> Vec<JoinHandle<()>> {
        let due = self
            .triggers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .poll(self.clock.now());

        due.into_iter()
            .map(|trigger| {
                let scheduler = Arc::clone(self);
                tokio::spawn(async move {
                    match scheduler.run_job(&trigger.job, trigger.params.clone()).await {
                        Ok(result) if result.is_success() => {
                            tracing::info!(job = %trigger.job, "triggered run succeeded");
                        }
                        Ok(result) => {
                            tracing::warn!(
                                job = %trigger.job,
                                outcome = %result.outcome(),
                                message = result.message().unwrap_or(""),
                                "triggered run did not succeed"
                            );
                        }
                        Err(err) => {
                            tracing::error!(job = %trigger.job, %err, "trigger dispatch failed");
                        }
                    }
                })
            })
            .collect()
    }

    /// Poll-and-dispatch loop; returns once `running` is cleared, for
    /// example from a Ctrl-C handler
    pub async fn run_until_shutdown(self: Arc<Self>, running: Arc<AtomicBool>) {
        while running.load(Ordering::SeqCst) {
            let wait = self
                .next_fire_time()
                .map(|at| at.saturating_duration_since(self.clock.now()))
                .unwrap_or(Duration::from_millis(500))
                .min(Duration::from_millis(500));
            tokio::time::sleep(wait).await;
            self.tick();
        }
        tracing::info!("scheduler loop stopped");
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

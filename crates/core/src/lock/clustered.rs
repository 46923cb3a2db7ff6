// SPDX-License-Identifier: MIT

//! Clustered lock handler
//!
//! Same reject-on-contention policy as the local handler, enforced
//! across the whole cooperating fleet through the coordination service.
//! While a run holds the lease it is heartbeated on an interval, so a
//! job outlasting the coordinator's stale threshold keeps its lock.
//! A coordination failure is reported as a failed result, never raised;
//! the wrapped run cannot fault (execution units contain panics), so the
//! release below is reached on every path.

use super::{Coordinator, HolderId, LockError, LockHandler};
use crate::job::{Job, Parameters};
use crate::result::JobResult;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct ClusteredLockHandler {
    coordinator: Arc<dyn Coordinator>,
    heartbeat_interval: Duration,
}

impl ClusteredLockHandler {
    pub fn new(coordinator: Arc<dyn Coordinator>) -> Self {
        Self {
            coordinator,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    /// Must stay well under the coordinator's stale threshold, or a
    /// live holder's lease can be reclaimed mid-run
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Refresh the lease on an interval for as long as the run lasts
    fn keep_alive(&self, lock_name: &str, holder: &HolderId) -> tokio::task::JoinHandle<()> {
        let coordinator = self.coordinator.clone();
        let name = lock_name.to_string();
        let holder = holder.clone();
        let interval = self.heartbeat_interval;
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if let Err(err) = coordinator.heartbeat(&name, &holder).await {
                    tracing::warn!(lock = %name, %err, "lease heartbeat failed");
                }
            }
        })
    }
}

#[async_trait]
impl LockHandler for ClusteredLockHandler {
    async fn run_exclusively(
        &self,
        lock_name: &str,
        job: Arc<dyn Job>,
        parameters: Parameters,
    ) -> JobResult {
        let holder = HolderId::generate();

        match self.coordinator.try_acquire(lock_name, &holder).await {
            Ok(true) => {}
            Ok(false) => {
                let err = LockError::Unavailable(lock_name.to_string());
                tracing::warn!(lock = lock_name, "clustered lock contention, rejecting run");
                return JobResult::blocked(lock_name, err.to_string());
            }
            Err(err) => {
                tracing::error!(lock = lock_name, %err, "clustered lock acquisition failed");
                return JobResult::failure(lock_name, err.to_string());
            }
        }

        let heartbeat = self.keep_alive(lock_name, &holder);
        let result = job.run(parameters).await;
        heartbeat.abort();

        if let Err(err) = self.coordinator.release(lock_name, &holder).await {
            // The lease will be reclaimed as stale; don't mask the run's result
            tracing::warn!(lock = lock_name, %err, "clustered lock release failed");
        }

        result
    }
}

#[cfg(test)]
#[path = "clustered_tests.rs"]
mod tests;

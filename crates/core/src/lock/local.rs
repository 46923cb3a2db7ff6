// SPDX-License-Identifier: MIT

//! In-process lock handler
//!
//! A shared table of held names. Release is tied to a drop guard, so
//! the name is freed on every exit path of the wrapped run.

use super::{LockError, LockHandler};
use crate::job::{Job, Parameters};
use crate::result::JobResult;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct LocalLockHandler {
    held: Arc<Mutex<HashSet<String>>>,
}

impl LocalLockHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a name is currently held (introspection, mainly for tests)
    pub fn is_held(&self, lock_name: &str) -> bool {
        self.held
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(lock_name)
    }
}

/// Frees the held name when dropped
struct HeldName {
    held: Arc<Mutex<HashSet<String>>>,
    name: String,
}

impl Drop for HeldName {
    fn drop(&mut self) {
        self.held
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.name);
    }
}

#[async_trait]
impl LockHandler for LocalLockHandler {
    async fn run_exclusively(
        &self,
        lock_name: &str,
        job: Arc<dyn Job>,
        parameters: Parameters,
    ) -> JobResult {
        let _guard = {
            let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
            if !held.insert(lock_name.to_string()) {
                let err = LockError::Unavailable(lock_name.to_string());
                tracing::warn!(lock = lock_name, "local lock contention, rejecting run");
                return JobResult::blocked(lock_name, err.to_string());
            }
            HeldName {
                held: Arc::clone(&self.held),
                name: lock_name.to_string(),
            }
        };

        job.run(parameters).await
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;

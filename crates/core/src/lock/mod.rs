// SPDX-License-Identifier: MIT

//! Lock handlers: cluster-safe mutual exclusion per job/group name
//!
//! Two implementations behind one capability: local (in-process) and
//! clustered (delegating to a coordination service). Both reject on
//! contention instead of queueing, so overlapping triggers for the same
//! name never pile up.

pub mod clustered;
pub mod coordinator;
pub mod local;

pub use clustered::ClusteredLockHandler;
pub use coordinator::{Coordinator, MemoryCoordinator};
pub use local::LocalLockHandler;

use crate::job::{Job, Parameters};
use crate::result::JobResult;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LockError {
    /// Another run currently holds the lock for this name
    #[error("lock '{0}' is unavailable")]
    Unavailable(String),

    /// The coordination service failed or was unreachable
    #[error("coordination service error: {0}")]
    Coordination(String),
}

/// Identifies one lock acquisition attempt
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HolderId(String);

impl HolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh unique holder for one run attempt
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Guards an execution unit's run with at-most-one concurrency per
/// `lock_name`.
///
/// Contention is never escalated to a fault: the losing caller gets a
/// `Blocked` result and the wrapped job is not invoked at all. The lock
/// is released on every exit path of the wrapped run.
#[async_trait]
pub trait LockHandler: Send + Sync {
    async fn run_exclusively(
        &self,
        lock_name: &str,
        job: Arc<dyn Job>,
        parameters: Parameters,
    ) -> JobResult;
}

//! cogs-core: Core library for the Cogs job execution toolkit
//!
//! This crate provides:
//! - The `Job` capability and its metadata/result/parameter model
//! - A dependency graph with topological level ordering for job groups
//! - A registry that lazily resolves names into cached execution units
//! - Local and clustered lock handlers for cluster-safe mutual exclusion
//! - A scheduler with a bounded worker pool and interval triggers

pub mod clock;

pub mod definition;
pub mod execution;
pub mod graph;
pub mod job;
pub mod listener;
pub mod lock;
pub mod metadata;
pub mod registry;
pub mod result;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use definition::{JobDefinition, LockType, MemberDefinition};
pub use execution::{Execution, JobGroup, SingleJob};
pub use graph::{DependencyGraph, RegistryError};
pub use job::{Job, Parameters};
pub use listener::{JobListener, Listeners, TracingListener};
pub use lock::{
    ClusteredLockHandler, Coordinator, HolderId, LocalLockHandler, LockError, LockHandler,
    MemoryCoordinator,
};
pub use metadata::{JobMetadata, Parameter};
pub use registry::JobRegistry;
pub use result::{JobOutcome, JobResult};
pub use scheduler::{Scheduler, SchedulerError, Trigger, TriggerQueue, WorkerPool};

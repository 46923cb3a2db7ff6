// SPDX-License-Identifier: MIT

//! Execution units: the resolved, runnable form of a requested name
//!
//! A closed set of two variants behind the `Job` capability: a single
//! job or a composite group. Both guarantee that faults raised by
//! wrapped jobs surface as failed results, never as uncaught panics.

pub mod group;
pub mod single;

pub use group::JobGroup;
pub use single::SingleJob;

use crate::job::{Job, Parameters};
use crate::metadata::JobMetadata;
use crate::result::JobResult;
use async_trait::async_trait;
use std::sync::Arc;

/// The resolved form of a requested name, cached by the registry
pub enum Execution {
    Single(SingleJob),
    Group(JobGroup),
}

#[async_trait]
impl Job for Execution {
    fn metadata(&self) -> &JobMetadata {
        match self {
            Execution::Single(single) => single.metadata(),
            Execution::Group(group) => group.metadata(),
        }
    }

    async fn run(&self, parameters: Parameters) -> JobResult {
        match self {
            Execution::Single(single) => single.run(parameters).await,
            Execution::Group(group) => group.run(parameters).await,
        }
    }
}

/// Run a job on its own task so a panic is contained and reported as a
/// failed result attributed to `name`
pub(crate) async fn run_contained(job: Arc<dyn Job>, name: &str, parameters: Parameters) -> JobResult {
    let handle = tokio::spawn(async move { job.run(parameters).await });
    match handle.await {
        Ok(result) => result,
        Err(err) if err.is_panic() => {
            let message = panic_message(err.into_panic());
            tracing::warn!(job = name, message, "job panicked");
            JobResult::failure(name, format!("job panicked: {message}"))
        }
        Err(_) => JobResult::failure(name, "job task was cancelled"),
    }
}

pub(crate) fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

// SPDX-License-Identifier: MIT

//! Lifecycle listeners invoked around every execution-unit run
//!
//! Listeners are registered when the registry is built and passed into
//! each execution unit at construction; there is no ambient global
//! listener state.

use crate::job::Parameters;
use crate::result::JobResult;
use std::sync::Arc;

/// Observes job lifecycle events
pub trait JobListener: Send + Sync {
    fn on_start(&self, job_name: &str, parameters: &Parameters);

    fn on_finish(&self, job_name: &str, result: &JobResult);
}

/// A shared, immutable set of listeners
pub type Listeners = Arc<Vec<Arc<dyn JobListener>>>;

/// Default listener that logs lifecycle events through `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingListener;

impl JobListener for TracingListener {
    fn on_start(&self, job_name: &str, parameters: &Parameters) {
        if parameters.is_empty() {
            tracing::info!(job = job_name, "job started");
        } else {
            tracing::info!(job = job_name, ?parameters, "job started");
        }
    }

    fn on_finish(&self, job_name: &str, result: &JobResult) {
        if result.is_success() {
            tracing::info!(job = job_name, "job finished");
        } else {
            tracing::warn!(
                job = job_name,
                outcome = %result.outcome(),
                message = result.message().unwrap_or(""),
                "job finished"
            );
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

//! Job-group execution unit
//!
//! Runs the graph's topological levels in order with a strict barrier:
//! every member of a level is dispatched onto the worker pool, all are
//! awaited before the next level starts, and once a completed level
//! contains a failure no further level starts. Already-dispatched
//! members always finish; there is no mid-level cancellation.

use super::panic_message;
use crate::graph::DependencyGraph;
use crate::job::{Job, Parameters};
use crate::listener::Listeners;
use crate::metadata::JobMetadata;
use crate::result::JobResult;
use crate::scheduler::WorkerPool;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

pub struct JobGroup {
    metadata: JobMetadata,
    /// Real jobs reachable in the graph, keyed by name
    jobs: HashMap<String, Arc<dyn Job>>,
    graph: DependencyGraph,
    pool: WorkerPool,
    listeners: Listeners,
}

impl JobGroup {
    pub fn new(
        name: &str,
        jobs: HashMap<String, Arc<dyn Job>>,
        graph: DependencyGraph,
        pool: WorkerPool,
        listeners: Listeners,
    ) -> Self {
        Self {
            metadata: JobMetadata::new(name),
            jobs,
            graph,
            pool,
            listeners,
        }
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Caller parameters apply to every member; a member's configured
    /// overrides win over its own metadata defaults, caller values win
    /// over both
    fn member_parameters(&self, member: &Arc<dyn Job>, caller: &Parameters) -> Parameters {
        let mut merged = Parameters::defaults_of(member.metadata());
        if let Some(overrides) = self.graph.param_overrides(member.metadata().name()) {
            merged = merged.overlaid_with(overrides);
        }
        merged.overlaid_with(caller)
    }
}

#[async_trait]
impl Job for JobGroup {
    fn metadata(&self) -> &JobMetadata {
        &self.metadata
    }

    async fn run(&self, parameters: Parameters) -> JobResult {
        for listener in self.listeners.iter() {
            listener.on_start(self.metadata.name(), &parameters);
        }

        let mut member_results = Vec::new();
        let mut failure_seen = false;

        for level in self.graph.top_sort() {
            if failure_seen {
                tracing::debug!(
                    group = self.metadata.name(),
                    "skipping remaining levels after failure"
                );
                break;
            }

            let mut handles = Vec::with_capacity(level.len());
            for name in &level {
                // Membership is exactly the graph's job set by construction
                let Some(job) = self.jobs.get(name) else {
                    continue;
                };
                let params = self.member_parameters(job, &parameters);
                handles.push((name.clone(), self.pool.spawn(job.clone(), params)));
            }

            // Strict barrier: the whole level finishes before we move on
            for (name, handle) in handles {
                let result = match handle.await {
                    Ok(result) => result,
                    Err(err) if err.is_panic() => {
                        let message = panic_message(err.into_panic());
                        JobResult::failure(&name, format!("job panicked: {message}"))
                    }
                    Err(_) => JobResult::failure(&name, "job task was cancelled"),
                };
                if !result.is_success() {
                    failure_seen = true;
                }
                member_results.push(result);
            }
        }

        let result = JobResult::group(self.metadata.name(), member_results);

        for listener in self.listeners.iter() {
            listener.on_finish(self.metadata.name(), &result);
        }

        result
    }
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;

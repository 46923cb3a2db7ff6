// SPDX-License-Identifier: MIT

//! The job registry: the facade that resolves names into cached
//! execution units
//!
//! `jobs`, `definitions`, and the available-name set are build-once and
//! read-only; the execution cache is the only mutated state and is
//! guarded by a single mutex. Construction happens outside the critical
//! section (it is side-effect free), and `entry().or_insert_with`
//! publishes exactly one unit per name — a racing loser's freshly built
//! unit is simply discarded.

use crate::definition::{JobDefinition, LockType};
use crate::execution::{Execution, JobGroup, SingleJob};
use crate::graph::{DependencyGraph, RegistryError};
use crate::job::{Job, Parameters};
use crate::listener::{JobListener, Listeners};
use crate::scheduler::WorkerPool;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

pub struct JobRegistry {
    /// Everything that can be requested: real job names plus definition
    /// (group) names
    available: BTreeSet<String>,
    /// Real job implementations, no groups here
    jobs: HashMap<String, Arc<dyn Job>>,
    /// Names of the real jobs, in graph-input form
    real_names: BTreeSet<String>,
    /// Configuration-declared definitions, groups included
    definitions: HashMap<String, JobDefinition>,
    /// Lazily populated execution units, never evicted
    executions: Mutex<HashMap<String, Arc<Execution>>>,
    pool: WorkerPool,
    listeners: Listeners,
}

impl JobRegistry {
    pub fn new(
        jobs: Vec<Arc<dyn Job>>,
        definitions: HashMap<String, JobDefinition>,
        pool: WorkerPool,
        listeners: Vec<Arc<dyn JobListener>>,
    ) -> Self {
        let jobs: HashMap<String, Arc<dyn Job>> = jobs
            .into_iter()
            .map(|job| (job.metadata().name().to_string(), job))
            .collect();

        let real_names: BTreeSet<String> = jobs.keys().cloned().collect();
        let mut available = real_names.clone();
        available.extend(definitions.keys().cloned());

        Self {
            available,
            jobs,
            real_names,
            definitions,
            executions: Mutex::new(HashMap::new()),
            pool,
            listeners: Arc::new(listeners),
        }
    }

    /// All names that can be requested, sorted
    pub fn available_jobs(&self) -> &BTreeSet<String> {
        &self.available
    }

    /// The registered real jobs (listing surface input)
    pub fn jobs(&self) -> impl Iterator<Item = &Arc<dyn Job>> {
        self.jobs.values()
    }

    /// The lock type configured for a name; unconfigured names default
    /// to local
    pub fn lock_type(&self, name: &str) -> LockType {
        self.definitions
            .get(name)
            .map(JobDefinition::lock_type)
            .unwrap_or_default()
    }

    pub fn worker_pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Resolve a name into its execution unit, building and caching it
    /// on first access
    pub fn job(&self, name: &str) -> Result<Arc<Execution>, RegistryError> {
        {
            let cache = self.executions.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(execution) = cache.get(name) {
                return Ok(Arc::clone(execution));
            }
        }

        if !self.available.contains(name) {
            return Err(RegistryError::UnknownJob(name.to_string()));
        }

        let execution = Arc::new(self.resolve(name)?);

        let mut cache = self.executions.lock().unwrap_or_else(|e| e.into_inner());
        let published = cache
            .entry(name.to_string())
            .or_insert_with(|| execution)
            .clone();
        Ok(published)
    }

    fn resolve(&self, name: &str) -> Result<Execution, RegistryError> {
        let graph = DependencyGraph::build(name, &self.definitions, &self.real_names)?;

        let reachable: Vec<&Arc<dyn Job>> = graph
            .job_names()
            .iter()
            .filter_map(|job_name| self.jobs.get(job_name))
            .collect();

        match reachable.as_slice() {
            // An empty group exposes nothing runnable
            [] => Err(RegistryError::UnknownJob(name.to_string())),

            // Standalone resolution: no composite machinery needed.
            // When the requested name aliases a collapsed group, the
            // metadata is cloned under the requested name with its
            // parameter list intact.
            [only] => {
                let job = Arc::clone(only);
                let metadata = if job.metadata().name() == name {
                    job.metadata().clone()
                } else {
                    job.metadata().renamed(name)
                };
                let overrides = graph
                    .param_overrides(job.metadata().name())
                    .cloned()
                    .unwrap_or_else(Parameters::new);
                Ok(Execution::Single(SingleJob::new(
                    job,
                    metadata,
                    overrides,
                    Arc::clone(&self.listeners),
                )))
            }

            _ => {
                let members: HashMap<String, Arc<dyn Job>> = reachable
                    .into_iter()
                    .map(|job| (job.metadata().name().to_string(), Arc::clone(job)))
                    .collect();
                Ok(Execution::Group(JobGroup::new(
                    name,
                    members,
                    graph,
                    self.pool.clone(),
                    Arc::clone(&self.listeners),
                )))
            }
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

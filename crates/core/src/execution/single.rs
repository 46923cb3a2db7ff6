// SPDX-License-Identifier: MIT

//! Single-job execution unit
//!
//! Wraps exactly one real job. When the requested name aliases a group
//! that collapsed to one member, the metadata is a renamed clone of the
//! member's metadata with the parameter list preserved, while `run`
//! still defers to the original job.

use super::run_contained;
use crate::job::{Job, Parameters};
use crate::listener::Listeners;
use crate::metadata::JobMetadata;
use crate::result::JobResult;
use async_trait::async_trait;
use std::sync::Arc;

pub struct SingleJob {
    delegate: Arc<dyn Job>,
    metadata: JobMetadata,
    /// Parameter overrides carried from the job's definition
    overrides: Parameters,
    listeners: Listeners,
}

impl SingleJob {
    pub fn new(
        delegate: Arc<dyn Job>,
        metadata: JobMetadata,
        overrides: Parameters,
        listeners: Listeners,
    ) -> Self {
        Self {
            delegate,
            metadata,
            overrides,
            listeners,
        }
    }
}

#[async_trait]
impl Job for SingleJob {
    fn metadata(&self) -> &JobMetadata {
        &self.metadata
    }

    async fn run(&self, parameters: Parameters) -> JobResult {
        let merged = Parameters::defaults_of(self.delegate.metadata())
            .overlaid_with(&self.overrides)
            .overlaid_with(&parameters);

        for listener in self.listeners.iter() {
            listener.on_start(self.metadata.name(), &merged);
        }

        // Attribute the result to this unit's name so an aliased run
        // reports under the requested name
        let result = run_contained(self.delegate.clone(), self.metadata.name(), merged)
            .await
            .renamed(self.metadata.name());

        for listener in self.listeners.iter() {
            listener.on_finish(self.metadata.name(), &result);
        }

        result
    }
}

#[cfg(test)]
#[path = "single_tests.rs"]
mod tests;

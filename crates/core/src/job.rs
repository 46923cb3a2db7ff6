// SPDX-License-Identifier: MIT

//! The `Job` capability and run parameters
//!
//! Concrete jobs are supplied by the embedding application; the core
//! only indexes and composes them.

use crate::metadata::JobMetadata;
use crate::result::JobResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Named run parameters passed to a job.
///
/// Layering: metadata defaults, then definition overrides, then
/// caller-supplied values, each applied with `overlaid_with`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, Value>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect a job's declared parameter defaults
    pub fn defaults_of(metadata: &JobMetadata) -> Self {
        let map = metadata
            .parameters()
            .iter()
            .filter_map(|p| p.default.clone().map(|v| (p.name.clone(), v)))
            .collect();
        Self(map)
    }

    pub fn set(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Produce a copy of `self` with `overlay` entries taking precedence
    pub fn overlaid_with(&self, overlay: &Parameters) -> Parameters {
        let mut merged = self.0.clone();
        for (key, value) in &overlay.0 {
            merged.insert(key.clone(), value.clone());
        }
        Parameters(merged)
    }
}

impl FromIterator<(String, Value)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A named, parameterized unit of work.
///
/// `run` reports failure through its `JobResult`; implementations should
/// not panic, but the execution units translate panics into failed
/// results anyway so a misbehaving job cannot take down a worker.
#[async_trait]
pub trait Job: Send + Sync {
    fn metadata(&self) -> &JobMetadata;

    async fn run(&self, parameters: Parameters) -> JobResult;
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;

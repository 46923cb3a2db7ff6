// SPDX-License-Identifier: MIT

//! Raw serde mirror of the catalogue TOML
//!
//! These types carry no semantics beyond shape; reference validation
//! lives in the loader. An unrecognized `lock` value fails
//! deserialization because `LockType` only admits its declared variants.

use cogs_core::{LockType, Parameters};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// The whole catalogue file
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogDoc {
    #[serde(default)]
    pub jobs: BTreeMap<String, JobEntry>,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupEntry>,
    #[serde(default)]
    pub triggers: Vec<TriggerEntry>,
}

/// `[jobs.NAME]`: a shell command with optional lock and parameter defaults
#[derive(Clone, Debug, Deserialize)]
pub struct JobEntry {
    pub command: String,
    #[serde(default)]
    pub lock: LockType,
    #[serde(default)]
    pub params: Parameters,
}

/// `[groups.NAME]`: members keyed by name, each with edges and overrides
#[derive(Clone, Debug, Deserialize)]
pub struct GroupEntry {
    #[serde(default)]
    pub jobs: BTreeMap<String, MemberEntry>,
    #[serde(default)]
    pub lock: LockType,
}

/// `[groups.NAME.jobs.MEMBER]`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MemberEntry {
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub params: Parameters,
}

/// `[[triggers]]`: run a named job or group on a fixed interval
#[derive(Clone, Debug, Deserialize)]
pub struct TriggerEntry {
    pub job: String,
    #[serde(with = "humantime_serde")]
    pub every: Duration,
    #[serde(default)]
    pub params: Parameters,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

//! Configuration-declared job definitions
//!
//! Definitions are produced by configuration loading (see the catalog
//! crate), handed to the registry at construction, and immutable for the
//! process lifetime.

use crate::job::Parameters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which lock handler guards a name's execution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockType {
    /// In-process mutual exclusion only
    #[default]
    Local,
    /// Fleet-wide mutual exclusion through the coordination service
    Clustered,
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockType::Local => write!(f, "local"),
            LockType::Clustered => write!(f, "clustered"),
        }
    }
}

/// One entry inside a definition: dependency edges plus parameter
/// overrides carried verbatim from configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberDefinition {
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub params: Parameters,
}

impl MemberDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depends_on(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.depends_on = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }
}

/// A named configuration entry: either a standalone job reference or a
/// group of members under dependency constraints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum JobDefinition {
    Single {
        #[serde(default)]
        member: MemberDefinition,
        #[serde(default)]
        lock: LockType,
    },
    Group {
        members: HashMap<String, MemberDefinition>,
        #[serde(default)]
        lock: LockType,
    },
}

impl JobDefinition {
    pub fn single(member: MemberDefinition, lock: LockType) -> Self {
        JobDefinition::Single { member, lock }
    }

    pub fn group(members: HashMap<String, MemberDefinition>, lock: LockType) -> Self {
        JobDefinition::Group { members, lock }
    }

    pub fn lock_type(&self) -> LockType {
        match self {
            JobDefinition::Single { lock, .. } | JobDefinition::Group { lock, .. } => *lock,
        }
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;

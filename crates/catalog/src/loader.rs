// SPDX-License-Identifier: MIT

//! Semantic validation and assembly
//!
//! Turns a parsed catalogue document into the inputs the core consumes:
//! command jobs, named definitions, and armed-on-demand triggers. Every
//! name referenced by a member, a dependency edge, or a trigger must be
//! declared somewhere in the document.

use crate::command::CommandJob;
use crate::parser::{read_document, ParseError};
use crate::types::CatalogDoc;
use cogs_core::{Job, JobDefinition, LockType, MemberDefinition, Trigger};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("name '{0}' is declared as both a job and a group")]
    DuplicateName(String),
    #[error("group '{0}' has no members")]
    EmptyGroup(String),
    #[error("group '{group}' member '{member}' is not a declared job or group")]
    UnknownMember { group: String, member: String },
    #[error("group '{group}' member '{member}' depends on undeclared name '{target}'")]
    UnknownDependency {
        group: String,
        member: String,
        target: String,
    },
    #[error("trigger references undeclared name '{0}'")]
    UnknownTriggerTarget(String),
}

/// A validated catalogue, ready to hand to the registry and scheduler
pub struct Catalog {
    pub jobs: Vec<Arc<dyn Job>>,
    pub definitions: HashMap<String, JobDefinition>,
    pub triggers: Vec<Trigger>,
}

/// Read, parse, and validate a catalogue file
pub fn load_path(path: &Path) -> Result<Catalog, LoadError> {
    load_catalog(read_document(path)?)
}

/// Validate a parsed document and assemble the catalogue
pub fn load_catalog(doc: CatalogDoc) -> Result<Catalog, LoadError> {
    for name in doc.groups.keys() {
        if doc.jobs.contains_key(name) {
            return Err(LoadError::DuplicateName(name.clone()));
        }
    }

    let declared =
        |name: &str| doc.jobs.contains_key(name) || doc.groups.contains_key(name);

    for (group_name, group) in &doc.groups {
        if group.jobs.is_empty() {
            return Err(LoadError::EmptyGroup(group_name.clone()));
        }
        for (member_name, member) in &group.jobs {
            if !declared(member_name) {
                return Err(LoadError::UnknownMember {
                    group: group_name.clone(),
                    member: member_name.clone(),
                });
            }
            for target in &member.depends_on {
                if !declared(target) {
                    return Err(LoadError::UnknownDependency {
                        group: group_name.clone(),
                        member: member_name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
    }

    for trigger in &doc.triggers {
        if !declared(&trigger.job) {
            return Err(LoadError::UnknownTriggerTarget(trigger.job.clone()));
        }
    }

    let mut jobs: Vec<Arc<dyn Job>> = Vec::new();
    let mut definitions = HashMap::new();

    for (name, entry) in &doc.jobs {
        jobs.push(Arc::new(CommandJob::new(name, &entry.command, &entry.params)));
        // Local is the registry's fallback, so only a clustered job needs
        // a standalone definition to carry its lock type
        if entry.lock != LockType::Local {
            definitions.insert(
                name.clone(),
                JobDefinition::single(MemberDefinition::new(), entry.lock),
            );
        }
    }

    for (name, group) in &doc.groups {
        let members = group
            .jobs
            .iter()
            .map(|(member_name, member)| {
                (
                    member_name.clone(),
                    MemberDefinition::new()
                        .depends_on(member.depends_on.iter().cloned())
                        .with_params(member.params.clone()),
                )
            })
            .collect();
        definitions.insert(name.clone(), JobDefinition::group(members, group.lock));
    }

    let triggers = doc
        .triggers
        .iter()
        .map(|t| Trigger::new(&t.job, t.every).with_params(t.params.clone()))
        .collect();

    tracing::info!(
        jobs = doc.jobs.len(),
        groups = doc.groups.len(),
        triggers = doc.triggers.len(),
        "catalogue loaded"
    );

    Ok(Catalog {
        jobs,
        definitions,
        triggers,
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

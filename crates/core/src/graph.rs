// SPDX-License-Identifier: MIT

//! Dependency graph construction and topological level ordering
//!
//! Built fresh for every registry resolution. Expansion is a depth-first
//! walk of the definitions: a group inlines its members, a member whose
//! name is itself defined expands recursively, and terminal nodes are
//! real job names. A dependency on a composite name means "depends on
//! every real job that composite expands to". Cycles are rejected during
//! traversal by tracking the active expansion path.

use crate::definition::{JobDefinition, MemberDefinition};
use crate::job::Parameters;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

/// Structural errors raised while resolving a requested name
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown job: '{0}' is not a registered job or configured group")]
    UnknownJob(String),

    #[error("cyclic dependency detected at '{0}'")]
    CyclicDependency(String),
}

/// The resolved dependency graph for one requested name
#[derive(Clone, Debug)]
pub struct DependencyGraph {
    root: String,
    /// Real job names reachable from the root, root included when real
    job_names: BTreeSet<String>,
    /// Dependency edges between real job names
    dependencies: BTreeMap<String, BTreeSet<String>>,
    /// Configuration parameter overrides per real job name
    param_overrides: BTreeMap<String, Parameters>,
}

impl DependencyGraph {
    /// Expand `requested` against the definitions and the set of real
    /// job names.
    pub fn build(
        requested: &str,
        definitions: &HashMap<String, JobDefinition>,
        jobs: &BTreeSet<String>,
    ) -> Result<Self, RegistryError> {
        let mut expander = Expander {
            definitions,
            jobs,
            memo: HashMap::new(),
            dependencies: BTreeMap::new(),
            param_overrides: BTreeMap::new(),
            path: Vec::new(),
        };

        expander.expand(requested)?;

        // Every real job touched during expansion owns a dependencies
        // entry, including jobs reached only through dependency edges
        let job_names: BTreeSet<String> = expander.dependencies.keys().cloned().collect();

        // Path tracking catches cycles through definitions; cycles built
        // purely from depends_on edges between real jobs only show up in
        // the edge set itself
        check_acyclic(&expander.dependencies)?;

        Ok(Self {
            root: requested.to_string(),
            job_names,
            dependencies: expander.dependencies,
            param_overrides: expander.param_overrides,
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// All real job names reachable from the root
    pub fn job_names(&self) -> &BTreeSet<String> {
        &self.job_names
    }

    /// Direct dependencies of a real job within this graph
    pub fn dependencies_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.dependencies.get(name)
    }

    /// Configured parameter overrides for a member, if any
    pub fn param_overrides(&self, name: &str) -> Option<&Parameters> {
        self.param_overrides.get(name)
    }

    /// Topological ordering as a sequence of levels.
    ///
    /// Each level is a set of mutually independent names; every name in
    /// level `k` depends only on names in levels `< k`. Members of one
    /// level are safe to run in parallel.
    pub fn top_sort(&self) -> Vec<BTreeSet<String>> {
        let empty = BTreeSet::new();
        let mut placed: BTreeSet<String> = BTreeSet::new();
        let mut remaining = self.job_names.clone();
        let mut levels = Vec::new();

        while !remaining.is_empty() {
            let level: BTreeSet<String> = remaining
                .iter()
                .filter(|name| {
                    self.dependencies
                        .get(*name)
                        .unwrap_or(&empty)
                        .is_subset(&placed)
                })
                .cloned()
                .collect();

            // build() rejects cycles, so the frontier can only stall if
            // the graph was mutated, which it never is
            if level.is_empty() {
                break;
            }

            for name in &level {
                remaining.remove(name);
            }
            placed.extend(level.iter().cloned());
            levels.push(level);
        }

        levels
    }
}

/// Reject edge sets where repeated frontier extraction stalls
fn check_acyclic(dependencies: &BTreeMap<String, BTreeSet<String>>) -> Result<(), RegistryError> {
    let mut placed: BTreeSet<&str> = BTreeSet::new();
    let mut remaining: BTreeSet<&str> = dependencies.keys().map(String::as_str).collect();

    while !remaining.is_empty() {
        let frontier: Vec<&str> = remaining
            .iter()
            .filter(|name| {
                dependencies[**name]
                    .iter()
                    .all(|dep| placed.contains(dep.as_str()) || !remaining.contains(dep.as_str()))
            })
            .copied()
            .collect();

        if frontier.is_empty() {
            let stuck = remaining
                .first()
                .map(|n| (*n).to_string())
                .unwrap_or_default();
            return Err(RegistryError::CyclicDependency(stuck));
        }
        for name in frontier {
            remaining.remove(name);
            placed.insert(name);
        }
    }

    Ok(())
}

/// Depth-first expansion state
struct Expander<'a> {
    definitions: &'a HashMap<String, JobDefinition>,
    jobs: &'a BTreeSet<String>,
    /// Terminal sets already computed, keyed by expanded name
    memo: HashMap<String, BTreeSet<String>>,
    dependencies: BTreeMap<String, BTreeSet<String>>,
    param_overrides: BTreeMap<String, Parameters>,
    /// Names on the active expansion path, for cycle detection
    path: Vec<String>,
}

impl Expander<'_> {
    /// Expand a name into the set of real job names it denotes
    fn expand(&mut self, name: &str) -> Result<BTreeSet<String>, RegistryError> {
        if self.path.iter().any(|n| n == name) {
            return Err(RegistryError::CyclicDependency(name.to_string()));
        }
        if let Some(terminals) = self.memo.get(name) {
            return Ok(terminals.clone());
        }

        self.path.push(name.to_string());
        let result = match self.definitions.get(name).cloned() {
            Some(JobDefinition::Single { member, .. }) => self.expand_single(name, &member),
            Some(JobDefinition::Group { members, .. }) => self.expand_group(&members),
            None if self.jobs.contains(name) => {
                self.dependencies.entry(name.to_string()).or_default();
                Ok(BTreeSet::from([name.to_string()]))
            }
            None => Err(RegistryError::UnknownJob(name.to_string())),
        };
        self.path.pop();

        let terminals = result?;
        self.memo.insert(name.to_string(), terminals.clone());
        Ok(terminals)
    }

    /// A standalone definition names a real job, possibly with edges
    fn expand_single(
        &mut self,
        name: &str,
        member: &MemberDefinition,
    ) -> Result<BTreeSet<String>, RegistryError> {
        if !self.jobs.contains(name) {
            return Err(RegistryError::UnknownJob(name.to_string()));
        }

        let deps = self.expand_dependencies(&member.depends_on)?;
        self.dependencies
            .entry(name.to_string())
            .or_default()
            .extend(deps);
        self.apply_overrides(&BTreeSet::from([name.to_string()]), &member.params);

        Ok(BTreeSet::from([name.to_string()]))
    }

    /// A group inlines its members; each member's edges attach to every
    /// real job the member expands to
    fn expand_group(
        &mut self,
        members: &HashMap<String, MemberDefinition>,
    ) -> Result<BTreeSet<String>, RegistryError> {
        let mut terminals = BTreeSet::new();

        for (member_name, member) in members {
            let member_terminals = self.expand(member_name)?;
            let deps = self.expand_dependencies(&member.depends_on)?;

            for terminal in &member_terminals {
                self.dependencies
                    .entry(terminal.clone())
                    .or_default()
                    .extend(deps.iter().cloned());
            }
            // Outer group entries win over overrides set deeper in
            self.apply_overrides(&member_terminals, &member.params);

            terminals.extend(member_terminals);
        }

        Ok(terminals)
    }

    /// Union of the terminal sets of all listed dependency names
    fn expand_dependencies(
        &mut self,
        depends_on: &[String],
    ) -> Result<BTreeSet<String>, RegistryError> {
        let mut deps = BTreeSet::new();
        for dep in depends_on {
            deps.extend(self.expand(dep)?);
        }
        Ok(deps)
    }

    fn apply_overrides(&mut self, terminals: &BTreeSet<String>, params: &Parameters) {
        if params.is_empty() {
            return;
        }
        for terminal in terminals {
            let merged = match self.param_overrides.get(terminal) {
                Some(existing) => existing.overlaid_with(params),
                None => params.clone(),
            };
            self.param_overrides.insert(terminal.clone(), merged);
        }
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;

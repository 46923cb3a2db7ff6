// SPDX-License-Identifier: MIT

use anyhow::Result;
use cogs_core::{Job, JobRegistry};
use std::sync::Arc;

/// Print every available job and group as `name(param:type=default, ...)`
pub fn run(registry: &Arc<JobRegistry>) -> Result<()> {
    let names = registry.available_jobs();
    if names.is_empty() {
        anyhow::bail!("no jobs are available");
    }

    for name in names {
        match registry.job(name) {
            Ok(execution) => println!("{}", execution.metadata()),
            Err(err) => println!("{name} (unresolvable: {err})"),
        }
    }

    Ok(())
}

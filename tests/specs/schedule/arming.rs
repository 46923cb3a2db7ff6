// SPDX-License-Identifier: MIT

//! `cogs schedule` specs
//!
//! The schedule loop runs until interrupted, so these specs cover the
//! fast-failing paths only; trigger timing is covered by the core
//! scheduler tests.

use crate::prelude::*;

#[test]
fn catalogue_without_triggers_fails_fast() {
    Workspace::with_catalog(
        r#"
        [jobs.backup]
        command = "true"
        "#,
    )
    .cogs()
    .arg("schedule")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no triggers"));
}

#[test]
fn trigger_against_an_undeclared_name_fails_loading() {
    Workspace::with_catalog(
        r#"
        [jobs.backup]
        command = "true"

        [[triggers]]
        job = "ghost"
        every = "5m"
        "#,
    )
    .cogs()
    .arg("schedule")
    .assert()
    .failure()
    .stderr(predicate::str::contains("ghost"));
}

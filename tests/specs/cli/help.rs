// SPDX-License-Identifier: MIT

//! Top-level CLI surface specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    Workspace::empty()
        .cogs()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("exec"))
        .stdout(predicate::str::contains("schedule"));
}

#[test]
fn version_prints_the_package_version() {
    Workspace::empty()
        .cogs()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cogs"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    Workspace::empty().cogs().arg("frobnicate").assert().failure();
}

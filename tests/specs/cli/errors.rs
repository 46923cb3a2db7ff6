// SPDX-License-Identifier: MIT

//! Catalogue loading error specs

use crate::prelude::*;

#[test]
fn missing_catalogue_file_fails() {
    Workspace::empty()
        .cogs()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load catalogue"));
}

#[test]
fn invalid_toml_fails_with_a_parse_error() {
    Workspace::with_catalog("[jobs.backup\ncommand =")
        .cogs()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOML parse error"));
}

#[test]
fn unrecognized_lock_type_fails_loading() {
    Workspace::with_catalog(
        r#"
        [jobs.backup]
        command = "true"
        lock = "galactic"
        "#,
    )
    .cogs()
    .arg("list")
    .assert()
    .failure();
}

#[test]
fn undeclared_dependency_target_fails_loading() {
    Workspace::with_catalog(
        r#"
        [jobs.report]
        command = "true"

        [groups.nightly.jobs.report]
        depends_on = ["ghost"]
        "#,
    )
    .cogs()
    .arg("list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("ghost"));
}

#[test]
fn empty_group_fails_loading() {
    Workspace::with_catalog(
        r#"
        [jobs.backup]
        command = "true"

        [groups.nightly]
        "#,
    )
    .cogs()
    .arg("list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no members"));
}

// SPDX-License-Identifier: MIT

//! `cogs list` specs

use crate::prelude::*;

#[test]
fn lists_jobs_and_groups_sorted_with_parameter_signatures() {
    let output = Workspace::with_catalog(
        r#"
        [jobs.report]
        command = "true"

        [jobs.backup]
        command = "true"
        params = { target = "/tmp" }

        [groups.nightly.jobs.backup]
        [groups.nightly.jobs.report]
        "#,
    )
    .cogs()
    .arg("list")
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["backup(target:string=\"/tmp\")", "nightly()", "report()"]
    );
}

#[test]
fn empty_catalogue_fails_with_a_clear_message() {
    Workspace::with_catalog("")
        .cogs()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no jobs are available"));
}

#[test]
fn catalog_flag_selects_a_non_default_path() {
    let workspace = Workspace::empty();
    workspace.file("jobs/alt.toml", "[jobs.backup]\ncommand = \"true\"\n");

    workspace
        .cogs()
        .args(["--catalog", "jobs/alt.toml", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backup()"));
}

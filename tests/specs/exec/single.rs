// SPDX-License-Identifier: MIT

//! `cogs exec` specs for standalone jobs

use crate::prelude::*;

#[test]
fn successful_job_exits_zero_and_reports_success() {
    let workspace = Workspace::with_catalog(
        r#"
        [jobs.touch]
        command = "printf done > out.txt"
        "#,
    );

    workspace
        .cogs()
        .args(["exec", "touch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("touch: success"));

    assert_eq!(workspace.read("out.txt"), "done");
}

#[test]
fn declared_defaults_are_exported_to_the_command() {
    let workspace = Workspace::with_catalog(
        r#"
        [jobs.export]
        command = "printf '%s' \"$COGS_PARAM_TARGET\" > out.txt"
        params = { target = "/tmp" }
        "#,
    );

    workspace.cogs().args(["exec", "export"]).assert().success();
    assert_eq!(workspace.read("out.txt"), "/tmp");
}

#[test]
fn caller_params_override_declared_defaults() {
    let workspace = Workspace::with_catalog(
        r#"
        [jobs.export]
        command = "printf '%s' \"$COGS_PARAM_TARGET\" > out.txt"
        params = { target = "/tmp" }
        "#,
    );

    workspace
        .cogs()
        .args(["exec", "export", "--param", "target=/mnt"])
        .assert()
        .success();
    assert_eq!(workspace.read("out.txt"), "/mnt");
}

#[test]
fn failing_job_exits_nonzero_and_names_the_status() {
    Workspace::with_catalog(
        r#"
        [jobs.bad]
        command = "exit 3"
        "#,
    )
    .cogs()
    .args(["exec", "bad"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("bad: failure"))
    .stdout(predicate::str::contains("status 3"));
}

#[test]
fn unknown_name_is_rejected() {
    Workspace::with_catalog(
        r#"
        [jobs.backup]
        command = "true"
        "#,
    )
    .cogs()
    .args(["exec", "missing"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown job"));
}

#[test]
fn malformed_param_is_rejected_before_running() {
    let workspace = Workspace::with_catalog(
        r#"
        [jobs.touch]
        command = "printf done > out.txt"
        "#,
    );

    workspace
        .cogs()
        .args(["exec", "touch", "--param", "no-separator"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
    assert!(!workspace.exists("out.txt"));
}

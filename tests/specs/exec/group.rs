// SPDX-License-Identifier: MIT

//! `cogs exec` specs for job groups

use crate::prelude::*;

#[test]
fn dependencies_run_before_their_dependents() {
    let workspace = Workspace::with_catalog(
        r#"
        [jobs.first]
        command = "printf 'first\n' >> order.log"

        [jobs.second]
        command = "printf 'second\n' >> order.log"

        [groups.chain.jobs.first]

        [groups.chain.jobs.second]
        depends_on = ["first"]
        "#,
    );

    workspace
        .cogs()
        .args(["exec", "chain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chain: success"));

    assert_eq!(workspace.read("order.log"), "first\nsecond\n");
}

#[test]
fn member_overrides_reach_the_right_member() {
    let workspace = Workspace::with_catalog(
        r#"
        [jobs.render]
        command = "printf '%s' \"$COGS_PARAM_FORMAT\" > format.txt"
        params = { format = "txt" }

        [groups.nightly.jobs.render]
        params = { format = "pdf" }
        "#,
    );

    workspace.cogs().args(["exec", "nightly"]).assert().success();
    assert_eq!(workspace.read("format.txt"), "pdf");
}

#[test]
fn failed_member_stops_later_levels_and_is_named() {
    let workspace = Workspace::with_catalog(
        r#"
        [jobs.breaks]
        command = "exit 1"

        [jobs.after]
        command = "printf ran > after.txt"

        [groups.chain.jobs.breaks]

        [groups.chain.jobs.after]
        depends_on = ["breaks"]
        "#,
    );

    workspace
        .cogs()
        .args(["exec", "chain"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed members: breaks"));

    assert!(!workspace.exists("after.txt"));
}

#[test]
fn mixed_member_outcomes_report_partial() {
    Workspace::with_catalog(
        r#"
        [jobs.good]
        command = "true"

        [jobs.bad]
        command = "false"

        [groups.pair.jobs.good]
        [groups.pair.jobs.bad]
        "#,
    )
    .cogs()
    .args(["exec", "pair"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("pair: partial"))
    .stdout(predicate::str::contains("failed members: bad"));
}

#[test]
fn group_collapsing_to_one_member_runs_under_the_group_name() {
    Workspace::with_catalog(
        r#"
        [jobs.backup]
        command = "true"

        [groups.solo.jobs.backup]
        "#,
    )
    .cogs()
    .args(["exec", "solo"])
    .assert()
    .success()
    .stdout(predicate::str::contains("solo: success"));
}

#[test]
fn cyclic_dependencies_are_rejected() {
    Workspace::with_catalog(
        r#"
        [jobs.a]
        command = "true"

        [jobs.b]
        command = "true"

        [groups.loop.jobs.a]
        depends_on = ["b"]

        [groups.loop.jobs.b]
        depends_on = ["a"]
        "#,
    )
    .cogs()
    .args(["exec", "loop"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("cyclic dependency"));
}

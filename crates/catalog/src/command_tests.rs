// SPDX-License-Identifier: MIT

use super::*;
use cogs_core::Job;
use serde_json::json;

#[test]
fn metadata_parameters_come_from_declared_defaults() {
    let defaults = Parameters::new()
        .set("target", json!("/tmp"))
        .set("retries", json!(3));
    let job = CommandJob::new("backup", "true", &defaults);

    let metadata = job.metadata();
    assert_eq!(metadata.name(), "backup");
    assert_eq!(metadata.to_string(), "backup(retries:int=3, target:string=\"/tmp\")");
}

#[tokio::test]
async fn zero_exit_is_success() {
    let job = CommandJob::new("ok", "true", &Parameters::new());
    let result = job.run(Parameters::new()).await;
    assert!(result.is_success());
    assert_eq!(result.job_name(), "ok");
}

#[tokio::test]
async fn nonzero_exit_is_failure_with_the_status() {
    let job = CommandJob::new("bad", "exit 3", &Parameters::new());
    let result = job.run(Parameters::new()).await;
    assert!(!result.is_success());
    assert!(result.message().is_some_and(|m| m.contains("status 3")));
}

#[tokio::test]
async fn parameters_are_exported_as_env_vars() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let job = CommandJob::new(
        "export",
        format!("printf '%s %s' \"$COGS_PARAM_TARGET\" \"$COGS_PARAM_DRY_RUN\" > {}", out.display()),
        &Parameters::new(),
    );

    let params = Parameters::new()
        .set("target", json!("/tmp"))
        .set("dry-run", json!(true));
    assert!(job.run(params).await.is_success());

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "/tmp true");
}

#[test]
fn env_var_names_are_upper_snake() {
    assert_eq!(env_var_name("target"), "COGS_PARAM_TARGET");
    assert_eq!(env_var_name("dry-run"), "COGS_PARAM_DRY_RUN");
    assert_eq!(env_var_name("s3.bucket"), "COGS_PARAM_S3_BUCKET");
}

#[test]
fn values_render_without_json_quoting_for_strings() {
    assert_eq!(env_var_value(&json!("plain")), "plain");
    assert_eq!(env_var_value(&json!(42)), "42");
    assert_eq!(env_var_value(&json!(true)), "true");
    assert_eq!(env_var_value(&json!(["a", "b"])), "[\"a\",\"b\"]");
}

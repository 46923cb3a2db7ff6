// SPDX-License-Identifier: MIT

//! Command-backed jobs
//!
//! A `CommandJob` wraps a shell command declared in the catalogue. Run
//! parameters are exported to the child as `COGS_PARAM_<NAME>` variables
//! and the exit status decides the result.

use async_trait::async_trait;
use cogs_core::{Job, JobMetadata, JobResult, Parameter, Parameters};
use serde_json::Value;

pub struct CommandJob {
    metadata: JobMetadata,
    command: String,
}

impl CommandJob {
    /// Build a command job. Declared parameter defaults become the job's
    /// metadata parameters, typed from their TOML values.
    pub fn new(name: impl Into<String>, command: impl Into<String>, defaults: &Parameters) -> Self {
        let mut metadata = JobMetadata::new(name);
        for (key, value) in defaults.iter() {
            metadata = metadata.with_parameter(
                Parameter::new(key, type_name_of(value)).with_default(value.clone()),
            );
        }
        Self {
            metadata,
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

#[async_trait]
impl Job for CommandJob {
    fn metadata(&self) -> &JobMetadata {
        &self.metadata
    }

    async fn run(&self, parameters: Parameters) -> JobResult {
        let name = self.metadata.name();

        let mut command = tokio::process::Command::new("sh");
        command.arg("-c").arg(&self.command);
        for (key, value) in parameters.iter() {
            command.env(env_var_name(key), env_var_value(value));
        }

        tracing::debug!(job = name, command = %self.command, "running command");
        let output = match command.output().await {
            Ok(output) => output,
            Err(err) => {
                return JobResult::failure(name, format!("failed to spawn command: {err}"));
            }
        };

        if !output.stdout.is_empty() {
            tracing::debug!(job = name, stdout = %String::from_utf8_lossy(&output.stdout), "command stdout");
        }
        if !output.stderr.is_empty() {
            tracing::warn!(job = name, stderr = %String::from_utf8_lossy(&output.stderr), "command stderr");
        }

        if output.status.success() {
            JobResult::success(name)
        } else {
            let code = output.status.code().unwrap_or(-1);
            JobResult::failure(name, format!("command exited with status {code}"))
        }
    }
}

fn env_var_name(key: &str) -> String {
    let upper: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("COGS_PARAM_{upper}")
}

/// Strings are exported bare; everything else keeps its JSON rendering
fn env_var_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_name_of(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::Array(_) | Value::Object(_) | Value::Null => "json",
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

use anyhow::Result;
use clap::Args;
use cogs_core::{Clock, Parameters, Scheduler};
use serde_json::Value;
use std::sync::Arc;

#[derive(Args)]
pub struct ExecArgs {
    /// Job or group name to run
    pub name: String,

    /// Run parameter, repeatable
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, Value)>,
}

/// Run one job or group through the scheduler and report the result
pub async fn run<C: Clock>(scheduler: &Arc<Scheduler<C>>, args: ExecArgs) -> Result<()> {
    let parameters: Parameters = args.params.into_iter().collect();
    let result = scheduler.run_job(&args.name, parameters).await?;

    for member in result.members() {
        println!("  {member}");
    }
    println!("{result}");

    if result.is_success() {
        Ok(())
    } else {
        anyhow::bail!("{} did not succeed: {}", args.name, result.outcome())
    }
}

/// Parse `key=value`; the value is taken as JSON when it parses, and as a
/// bare string otherwise
fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;

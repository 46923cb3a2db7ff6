// SPDX-License-Identifier: MIT

//! cogs - dependency-aware job scheduling CLI

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cogs_core::{
    ClusteredLockHandler, JobListener, JobRegistry, LocalLockHandler, LockHandler, LockType,
    MemoryCoordinator, Scheduler, SystemClock, TracingListener, WorkerPool,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cogs", version, about = "Cogs - dependency-aware job scheduling")]
struct Cli {
    /// Path to the job catalogue
    #[arg(short, long, global = true, default_value = "catalog.toml")]
    catalog: PathBuf,

    /// Number of job workers
    #[arg(long, global = true, default_value_t = 4)]
    workers: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available jobs and their parameters
    List,
    /// Run a job or group once
    Exec(commands::exec::ExecArgs),
    /// Arm catalogue triggers and run until interrupted
    Schedule,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let catalog = cogs_catalog::load_path(&cli.catalog)
        .with_context(|| format!("failed to load catalogue {}", cli.catalog.display()))?;

    let registry = Arc::new(JobRegistry::new(
        catalog.jobs,
        catalog.definitions,
        WorkerPool::new(cli.workers),
        vec![Arc::new(TracingListener) as Arc<dyn JobListener>],
    ));

    let handlers: HashMap<LockType, Arc<dyn LockHandler>> = HashMap::from([
        (
            LockType::Local,
            Arc::new(LocalLockHandler::new()) as Arc<dyn LockHandler>,
        ),
        (
            LockType::Clustered,
            Arc::new(ClusteredLockHandler::new(Arc::new(MemoryCoordinator::new())))
                as Arc<dyn LockHandler>,
        ),
    ]);

    let scheduler = Arc::new(Scheduler::new(registry, handlers, SystemClock));

    match cli.command {
        Commands::List => commands::list::run(scheduler.registry()),
        Commands::Exec(args) => commands::exec::run(&scheduler, args).await,
        Commands::Schedule => commands::schedule::run(scheduler, catalog.triggers).await,
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

// SPDX-License-Identifier: MIT

use anyhow::Result;
use cogs_core::{Clock, Scheduler, Trigger};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Arm every catalogue trigger and dispatch until Ctrl-C
pub async fn run<C: Clock>(scheduler: Arc<Scheduler<C>>, triggers: Vec<Trigger>) -> Result<()> {
    if triggers.is_empty() {
        anyhow::bail!("the catalogue declares no triggers");
    }

    for trigger in triggers {
        println!("armed: {} every {:?}", trigger.job, trigger.every);
        scheduler.schedule(trigger);
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nshutting down...");
        r.store(false, Ordering::SeqCst);
    })?;

    scheduler.run_until_shutdown(running).await;
    Ok(())
}

// SPDX-License-Identifier: MIT

//! Coordination-service boundary for the clustered lock
//!
//! The `Coordinator` trait is the black-box transport contract: a real
//! deployment implements it against ZooKeeper, etcd, or similar.
//! `MemoryCoordinator` is the in-process implementation used for
//! single-node fleets and tests; it keeps a lease table with
//! heartbeat-based stale detection so a crashed holder's lease can be
//! reclaimed instead of wedging the name forever.

use super::{HolderId, LockError};
use crate::clock::{Clock, SystemClock};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Distributed-lock transport contract
#[async_trait]
pub trait Coordinator: Send + Sync {
    /// Attempt to take the lease for `name`. Returns `false` when
    /// another live holder has it.
    async fn try_acquire(&self, name: &str, holder: &HolderId) -> Result<bool, LockError>;

    /// Give up the lease. Releasing a lease held by someone else is a
    /// no-op.
    async fn release(&self, name: &str, holder: &HolderId) -> Result<(), LockError>;

    /// Refresh the holder's lease so it is not considered stale
    async fn heartbeat(&self, name: &str, holder: &HolderId) -> Result<(), LockError>;
}

#[derive(Clone, Debug)]
struct Lease {
    holder: HolderId,
    last_heartbeat: Instant,
}

/// In-process lease table with stale-holder reclaim
pub struct MemoryCoordinator<C: Clock = SystemClock> {
    leases: Mutex<HashMap<String, Lease>>,
    stale_threshold: Duration,
    clock: C,
}

impl MemoryCoordinator<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryCoordinator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryCoordinator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            leases: Mutex::new(HashMap::new()),
            stale_threshold: Duration::from_secs(60),
            clock,
        }
    }

    pub fn with_stale_threshold(mut self, threshold: Duration) -> Self {
        self.stale_threshold = threshold;
        self
    }

    /// Current lease holder for a name, if any
    pub fn holder_of(&self, name: &str) -> Option<HolderId> {
        self.leases
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .map(|lease| lease.holder.clone())
    }

    fn is_stale(&self, lease: &Lease, now: Instant) -> bool {
        now.duration_since(lease.last_heartbeat) > self.stale_threshold
    }
}

#[async_trait]
impl<C: Clock> Coordinator for MemoryCoordinator<C> {
    async fn try_acquire(&self, name: &str, holder: &HolderId) -> Result<bool, LockError> {
        let now = self.clock.now();
        let mut leases = self.leases.lock().unwrap_or_else(|e| e.into_inner());

        match leases.get(name) {
            None => {
                leases.insert(
                    name.to_string(),
                    Lease {
                        holder: holder.clone(),
                        last_heartbeat: now,
                    },
                );
                Ok(true)
            }
            Some(lease) if &lease.holder == holder => {
                // Idempotent re-acquire refreshes the lease
                leases.insert(
                    name.to_string(),
                    Lease {
                        holder: holder.clone(),
                        last_heartbeat: now,
                    },
                );
                Ok(true)
            }
            Some(lease) if self.is_stale(lease, now) => {
                tracing::warn!(
                    lock = name,
                    previous = %lease.holder,
                    new = %holder,
                    "reclaiming stale lease"
                );
                leases.insert(
                    name.to_string(),
                    Lease {
                        holder: holder.clone(),
                        last_heartbeat: now,
                    },
                );
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    async fn release(&self, name: &str, holder: &HolderId) -> Result<(), LockError> {
        let mut leases = self.leases.lock().unwrap_or_else(|e| e.into_inner());
        if leases.get(name).is_some_and(|lease| &lease.holder == holder) {
            leases.remove(name);
        }
        Ok(())
    }

    async fn heartbeat(&self, name: &str, holder: &HolderId) -> Result<(), LockError> {
        let now = self.clock.now();
        let mut leases = self.leases.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(lease) = leases.get_mut(name) {
            if &lease.holder == holder {
                lease.last_heartbeat = now;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;

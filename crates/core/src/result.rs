// SPDX-License-Identifier: MIT

//! Job execution results
//!
//! Every run produces a `JobResult`, never a fault: job panics, lock
//! contention, and member failures are all folded into the result so a
//! caller can attribute what happened without unwinding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of a single run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobOutcome {
    /// The job (and every group member, if any) succeeded
    Success,
    /// The job failed, or every member of a group failed
    Failure,
    /// Some group members succeeded while others failed
    Partial,
    /// The run never started: the lock for this name was unavailable
    Blocked,
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobOutcome::Success => write!(f, "success"),
            JobOutcome::Failure => write!(f, "failure"),
            JobOutcome::Partial => write!(f, "partial"),
            JobOutcome::Blocked => write!(f, "blocked"),
        }
    }
}

/// The result of running a job or job group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    job: String,
    outcome: JobOutcome,
    message: Option<String>,
    /// Per-member results when this result belongs to a group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    members: Vec<JobResult>,
}

impl JobResult {
    pub fn success(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            outcome: JobOutcome::Success,
            message: None,
            members: Vec::new(),
        }
    }

    pub fn failure(job: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            outcome: JobOutcome::Failure,
            message: Some(message.into()),
            members: Vec::new(),
        }
    }

    /// A run rejected because its lock was held elsewhere
    pub fn blocked(job: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            outcome: JobOutcome::Blocked,
            message: Some(message.into()),
            members: Vec::new(),
        }
    }

    /// Aggregate member results into a group result.
    ///
    /// All members succeeded → `Success`; all failed → `Failure`;
    /// mixed → `Partial`. The message names the failed members.
    pub fn group(job: impl Into<String>, members: Vec<JobResult>) -> Self {
        let job = job.into();
        let failed: Vec<&str> = members
            .iter()
            .filter(|m| !m.is_success())
            .map(JobResult::job_name)
            .collect();

        let (outcome, message) = if failed.is_empty() {
            (JobOutcome::Success, None)
        } else {
            let outcome = if failed.len() == members.len() {
                JobOutcome::Failure
            } else {
                JobOutcome::Partial
            };
            (outcome, Some(format!("failed members: {}", failed.join(", "))))
        };

        Self {
            job,
            outcome,
            message,
            members,
        }
    }

    /// This result re-attributed to an alias name
    pub fn renamed(mut self, job: impl Into<String>) -> Self {
        self.job = job.into();
        self
    }

    pub fn job_name(&self) -> &str {
        &self.job
    }

    pub fn outcome(&self) -> JobOutcome {
        self.outcome
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn members(&self) -> &[JobResult] {
        &self.members
    }

    pub fn is_success(&self) -> bool {
        self.outcome == JobOutcome::Success
    }

    /// Member results that did not succeed
    pub fn failed_members(&self) -> Vec<&JobResult> {
        self.members.iter().filter(|m| !m.is_success()).collect()
    }
}

impl fmt::Display for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.job, self.outcome)?;
        if let Some(message) = &self.message {
            write!(f, " ({message})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;

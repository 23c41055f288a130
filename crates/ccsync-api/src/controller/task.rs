// Asynchronous task tracking
//
// Controller writes return a task id. Instead of sleeping a fixed interval
// and hoping the write landed, poll the task endpoint with exponential
// backoff until it reports an end time or an error.

use std::time::Duration;

use tracing::{debug, warn};

use crate::controller::client::ControllerClient;
use crate::controller::models::{TaskHandle, TaskStatus};
use crate::error::Error;

/// How long to wait for asynchronous controller tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPolicy {
    /// Delay before the second status check; doubled after every check.
    pub initial_delay: Duration,
    /// Upper bound for a single backoff delay.
    pub max_delay: Duration,
    /// Status checks before giving up with [`Error::TaskTimeout`].
    pub max_attempts: u32,
    /// Fixed wait used when the controller returned no task id to poll.
    pub settle_delay: Duration,
}

impl Default for TaskPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            max_attempts: 10,
            settle_delay: Duration::from_secs(10),
        }
    }
}

impl TaskPolicy {
    /// Delay to sleep after the `attempt`-th check (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1_u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl ControllerClient {
    /// Current status of one task.
    ///
    /// `GET /dna/intent/api/v1/task/{task_id}`
    pub async fn task_status(&self, task_id: &str) -> Result<TaskStatus, Error> {
        self.get(&format!("dna/intent/api/v1/task/{task_id}"), &[])
            .await
    }

    /// Block until the task behind `handle` finishes.
    ///
    /// Without a task id there is nothing to poll; the policy's settle
    /// delay is slept instead, which is only an approximation of "done".
    pub async fn wait_for_task(
        &self,
        handle: &TaskHandle,
        policy: &TaskPolicy,
    ) -> Result<(), Error> {
        let Some(task_id) = handle.task_id.as_deref() else {
            warn!(
                delay = ?policy.settle_delay,
                "controller returned no task id, waiting a fixed settle delay"
            );
            tokio::time::sleep(policy.settle_delay).await;
            return Ok(());
        };

        for attempt in 1..=policy.max_attempts {
            let status = self.task_status(task_id).await?;
            if status.is_error {
                return Err(Error::TaskFailed {
                    task_id: task_id.to_owned(),
                    reason: status
                        .failure_reason
                        .or(status.progress)
                        .unwrap_or_else(|| "unknown".into()),
                });
            }
            if status.is_finished() {
                debug!(task_id, attempt, "task finished");
                return Ok(());
            }
            if attempt < policy.max_attempts {
                let delay = policy.backoff(attempt);
                debug!(task_id, attempt, ?delay, "task still running");
                tokio::time::sleep(delay).await;
            }
        }

        Err(Error::TaskTimeout {
            task_id: task_id.to_owned(),
            attempts: policy.max_attempts,
        })
    }
}

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::{task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use crate::storage::ReminderStorage;

use super::delivery::ReminderDeliveryChannel;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

pub struct ScheduledTask {
    task_handle: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

impl ScheduledTask {
    pub fn new(task_handle: JoinHandle<()>, cancellation_token: CancellationToken) -> Self {
        Self {
            task_handle,
            cancellation_token,
        }
    }

    pub async fn cancel(self, timeout: Duration) {
        self.cancellation_token.cancel();
        let cancel_with_timeout = time::timeout(timeout, self.task_handle);
        if cancel_with_timeout.await.is_err() {
            log::warn!("Reminder scheduler did not stop within {:?}", timeout);
        }
    }
}

/// Periodically fires due reminders. Every due reminder gets exactly one
/// delivery attempt and is dropped afterwards, whether delivery worked or not.
pub struct ReminderScheduler {
    storage: Arc<dyn ReminderStorage>,
    delivery_channel: Arc<dyn ReminderDeliveryChannel>,
    poll_interval: Duration,
}

impl ReminderScheduler {
    pub fn new(
        storage: Arc<dyn ReminderStorage>,
        delivery_channel: Arc<dyn ReminderDeliveryChannel>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            storage,
            delivery_channel,
            poll_interval,
        }
    }

    pub fn start(self) -> ScheduledTask {
        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();

        let task_handle = tokio::spawn(async move {
            self.run(task_cancellation_token).await;
        });

        ScheduledTask::new(task_handle, cancellation_token)
    }

    pub async fn run(&self, cancellation_token: CancellationToken) {
        log::info!(
            "Reminder scheduler started, checking every {:?}",
            self.poll_interval
        );

        loop {
            if cancellation_token.is_cancelled() {
                break;
            }

            self.run_pass(Utc::now()).await;

            tokio::select! {
                _ = cancellation_token.cancelled() => break,
                _ = time::sleep(self.poll_interval) => {}
            }
        }

        log::info!("Reminder scheduler stopped");
    }

    /// Attempts delivery of everything due at `now`. Returns the number of attempts.
    pub async fn run_pass(&self, now: DateTime<Utc>) -> usize {
        let due = self.storage.due_reminders(now).await;
        if !due.is_empty() {
            log::debug!("Delivering {} due reminders", due.len());
        }

        for reminder in &due {
            let text = reminder.delivery_text();
            if let Err(error) = self.delivery_channel.deliver(reminder.owner_id, &text).await {
                log::warn!(
                    "Could not deliver reminder. [user_id = {}, error = {}]",
                    reminder.owner_id,
                    error
                );
            }

            self.storage.remove(reminder.owner_id, reminder).await;
        }

        due.len()
    }
}

#[cfg(test)]
mod tests;

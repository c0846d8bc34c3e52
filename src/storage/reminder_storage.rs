use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::reminder::{Reminder, UserId};

#[async_trait]
pub trait ReminderStorage: Send + Sync {
    async fn add(&self, user_id: UserId, fire_at: DateTime<Utc>, message: String) -> Reminder;
    async fn due_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder>;
    /// Removes a single equal reminder. Removing an absent reminder does nothing.
    async fn remove(&self, user_id: UserId, reminder: &Reminder);
    async fn user_reminders(&self, user_id: UserId) -> Vec<Reminder>;
}

/// Pending reminders bucketed per user. Buckets never stay around empty.
pub struct InMemoryReminderStorage {
    buckets: RwLock<HashMap<UserId, Vec<Reminder>>>,
}

impl InMemoryReminderStorage {
    pub fn new() -> Self {
        InMemoryReminderStorage {
            buckets: RwLock::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub async fn has_bucket(&self, user_id: UserId) -> bool {
        self.buckets.read().await.contains_key(&user_id)
    }
}

#[async_trait]
impl ReminderStorage for InMemoryReminderStorage {
    async fn add(&self, user_id: UserId, fire_at: DateTime<Utc>, message: String) -> Reminder {
        let reminder = Reminder::new(user_id, fire_at, message);
        self.buckets
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(reminder.clone());

        reminder
    }

    async fn due_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let buckets = self.buckets.read().await;
        buckets
            .values()
            .flat_map(|bucket| bucket.iter().filter(|reminder| reminder.is_due(now)))
            .cloned()
            .collect()
    }

    async fn remove(&self, user_id: UserId, reminder: &Reminder) {
        let mut buckets = self.buckets.write().await;
        let Some(bucket) = buckets.get_mut(&user_id) else {
            return;
        };

        if let Some(position) = bucket.iter().position(|stored| stored == reminder) {
            bucket.remove(position);
        }

        if bucket.is_empty() {
            buckets.remove(&user_id);
        }
    }

    async fn user_reminders(&self, user_id: UserId) -> Vec<Reminder> {
        self.buckets
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{TimeDelta, TimeZone};

use crate::{
    reminder::UserId,
    scheduling::delivery::DeliveryError,
    storage::InMemoryReminderStorage,
};

use super::*;

type ReceivedMessages = Arc<Mutex<Vec<(UserId, String)>>>;

struct TestDeliveryChannel {
    received_messages: ReceivedMessages,
    blocked_users: HashSet<UserId>,
}

#[async_trait]
impl ReminderDeliveryChannel for TestDeliveryChannel {
    async fn deliver(&self, user_id: UserId, text: &str) -> Result<(), DeliveryError> {
        self.received_messages
            .lock()
            .unwrap()
            .push((user_id, text.to_owned()));

        if self.blocked_users.contains(&user_id) {
            return Err(DeliveryError::Forbidden(user_id));
        }
        Ok(())
    }
}

struct TestContext {
    received_messages: ReceivedMessages,
    storage: Arc<InMemoryReminderStorage>,
    scheduler: ReminderScheduler,
}

impl TestContext {
    fn new() -> Self {
        Self::with_blocked_users(&[])
    }

    fn with_blocked_users(blocked: &[UserId]) -> Self {
        let received_messages = ReceivedMessages::default();
        let delivery_channel = Arc::new(TestDeliveryChannel {
            received_messages: Arc::clone(&received_messages),
            blocked_users: blocked.iter().copied().collect(),
        });
        let storage = Arc::new(InMemoryReminderStorage::new());
        let scheduler = ReminderScheduler::new(
            storage.clone(),
            delivery_channel,
            DEFAULT_POLL_INTERVAL,
        );

        Self {
            received_messages,
            storage,
            scheduler,
        }
    }

    fn received(&self) -> Vec<(UserId, String)> {
        self.received_messages.lock().unwrap().clone()
    }
}

fn nine_am() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
}

#[tokio::test]
async fn pass_delivers_every_due_reminder_and_drops_bucket() {
    let ctx = TestContext::new();
    ctx.storage.add(1, nine_am(), "pay rent".to_owned()).await;
    ctx.storage
        .add(1, nine_am() - TimeDelta::hours(1), "water plants".to_owned())
        .await;

    let attempts = ctx.scheduler.run_pass(nine_am()).await;

    assert_eq!(attempts, 2);
    let mut received = ctx.received();
    received.sort();
    assert_eq!(
        received,
        vec![
            (1, "Reminder: pay rent".to_owned()),
            (1, "Reminder: water plants".to_owned()),
        ]
    );
    assert!(!ctx.storage.has_bucket(1).await);
}

#[tokio::test]
async fn pass_leaves_future_reminders_alone() {
    let ctx = TestContext::new();
    ctx.storage
        .add(1, nine_am() + TimeDelta::minutes(1), "later".to_owned())
        .await;

    let attempts = ctx.scheduler.run_pass(nine_am()).await;

    assert_eq!(attempts, 0);
    assert!(ctx.received().is_empty());
    assert_eq!(ctx.storage.user_reminders(1).await.len(), 1);
}

#[tokio::test]
async fn failed_delivery_consumes_reminder_and_does_not_stop_pass() {
    let ctx = TestContext::with_blocked_users(&[1]);
    ctx.storage.add(1, nine_am(), "blocked".to_owned()).await;
    ctx.storage.add(2, nine_am(), "fine".to_owned()).await;

    let attempts = ctx.scheduler.run_pass(nine_am()).await;

    assert_eq!(attempts, 2);
    assert_eq!(ctx.received().len(), 2);
    assert!(!ctx.storage.has_bucket(1).await);
    assert!(!ctx.storage.has_bucket(2).await);

    ctx.scheduler.run_pass(nine_am()).await;
    assert_eq!(ctx.received().len(), 2, "Failed reminders are never retried");
}

#[tokio::test]
async fn overlapping_passes_deliver_once() {
    let ctx = TestContext::new();
    ctx.storage.add(1, nine_am(), "pay rent".to_owned()).await;

    ctx.scheduler.run_pass(nine_am()).await;
    ctx.scheduler.run_pass(nine_am() + TimeDelta::minutes(1)).await;

    assert_eq!(ctx.received(), vec![(1, "Reminder: pay rent".to_owned())]);
}

#[tokio::test(start_paused = true)]
async fn background_loop_polls_until_cancelled() {
    let ctx = TestContext::new();
    let storage = ctx.storage.clone();
    let received_messages = ctx.received_messages.clone();

    storage
        .add(1, Utc::now() - TimeDelta::minutes(1), "first".to_owned())
        .await;

    let task = ctx.scheduler.start();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(received_messages.lock().unwrap().len(), 1);

    storage
        .add(2, Utc::now() - TimeDelta::seconds(1), "second".to_owned())
        .await;
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(
        received_messages.lock().unwrap().len(),
        1,
        "The next pass only happens after the full interval"
    );

    tokio::time::sleep(DEFAULT_POLL_INTERVAL).await;
    assert_eq!(received_messages.lock().unwrap().len(), 2);

    task.cancel(Duration::from_secs(5)).await;

    storage
        .add(3, Utc::now() - TimeDelta::seconds(1), "third".to_owned())
        .await;
    tokio::time::sleep(DEFAULT_POLL_INTERVAL * 2).await;
    assert_eq!(received_messages.lock().unwrap().len(), 2);
}

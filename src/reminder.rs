use chrono::{DateTime, Utc};

pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub owner_id: UserId,
    pub fire_at: DateTime<Utc>,
    pub message: String,
}

impl Reminder {
    pub fn new(owner_id: UserId, fire_at: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            owner_id,
            fire_at,
            message: message.into(),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.fire_at <= now
    }

    /// Text sent to the owner when the reminder fires.
    pub fn delivery_text(&self) -> String {
        format!("Reminder: {}", self.message)
    }
}

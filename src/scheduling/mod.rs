mod delivery;
mod scheduler;

pub use delivery::{DeliveryError, ReminderDeliveryChannel};
pub use scheduler::{DEFAULT_POLL_INTERVAL, ReminderScheduler};

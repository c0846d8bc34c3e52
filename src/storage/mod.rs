mod music_queue;
mod poll_storage;
mod reminder_storage;

pub use music_queue::MusicQueue;
pub use poll_storage::{InMemoryPollStorage, PollError, PollStorage, validate_options};
pub use reminder_storage::{InMemoryReminderStorage, ReminderStorage};

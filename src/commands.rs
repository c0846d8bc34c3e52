use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    poll::NUMBER_EMOJI,
    reminder::Reminder,
    storage::{PollError, validate_options},
    time_parser,
};

/// A recognised `!` command with its raw, trimmed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Remind(String),
    Reminders,
    Poll(String),
    DeletePoll(String),
    Summarize(String),
    Play(String),
    Queue,
    Welcome(String),
}

// `!reminders` has to be matched before `!remind`.
const COMMANDS: [(&str, fn(String) -> Command); 8] = [
    ("!reminders", |_| Command::Reminders),
    ("!remind", Command::Remind),
    ("!poll", Command::Poll),
    ("!summarize", Command::Summarize),
    ("!play", Command::Play),
    ("!queue", |_| Command::Queue),
    ("!welcome", Command::Welcome),
    ("!delete_poll", Command::DeletePoll),
];

impl Command {
    /// Matches the command name as a case-insensitive prefix of the message.
    pub fn parse(text: &str) -> Option<Self> {
        COMMANDS.iter().find_map(|(name, build)| {
            let head = text.get(..name.len())?;
            if !head.eq_ignore_ascii_case(name) {
                return None;
            }

            Some(build(text[name.len()..].trim().to_owned()))
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: !remind <date> <time> <message>, e.g. !remind 2025-01-01 09:00 pay rent")]
    RemindUsage,

    #[error("Invalid time format. Please use a valid date-time format.")]
    InvalidTime,

    #[error("Write AM/PM right after the time, e.g. !remind 2025-01-01 09:00PM call mom")]
    DetachedMeridiem,

    #[error("Usage: !poll <question> <option 1>,<option 2>[,...]")]
    PollUsage,

    #[error(transparent)]
    Poll(#[from] PollError),

    #[error("Usage: !delete_poll <poll id>")]
    DeletePollUsage,

    #[error("'{0}' is not a valid poll id.")]
    InvalidPollId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub fire_at: DateTime<Utc>,
    pub message: String,
}

/// `<date> <time> <message>`: the first two words form the time.
pub fn parse_remind_args(args: &str) -> Result<ReminderRequest, CommandError> {
    let Some((date, rest)) = next_word(args) else {
        return Err(CommandError::RemindUsage);
    };
    let Some((time, message)) = next_word(rest) else {
        return Err(CommandError::RemindUsage);
    };

    let message = message.trim();
    if message.is_empty() {
        return Err(CommandError::RemindUsage);
    }

    // A detached "PM" would otherwise end up in the message and the time read as 24-hour.
    let first_word = next_word(message).map_or(message, |(word, _)| word);
    if ["am", "pm"]
        .iter()
        .any(|marker| first_word.eq_ignore_ascii_case(marker))
    {
        return Err(CommandError::DetachedMeridiem);
    }

    let fire_at = time_parser::parse(&format!("{date} {time}")).ok_or(CommandError::InvalidTime)?;

    Ok(ReminderRequest {
        fire_at,
        message: message.to_owned(),
    })
}

/// Splits off the first word, skipping any run of whitespace around it.
fn next_word(text: &str) -> Option<(&str, &str)> {
    text.trim_start().split_once(char::is_whitespace)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub question: String,
    pub options: Vec<String>,
}

/// `<question> <options>`: the question is a single word, options are comma separated.
pub fn parse_poll_args(args: &str) -> Result<PollDraft, CommandError> {
    let Some((question, options)) = args.split_once(' ') else {
        return Err(CommandError::PollUsage);
    };

    let options: Vec<String> = options
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_owned)
        .collect();

    validate_options(&options)?;

    Ok(PollDraft {
        question: question.to_owned(),
        options,
    })
}

pub fn parse_poll_id(args: &str) -> Result<i32, CommandError> {
    if args.is_empty() {
        return Err(CommandError::DeletePollUsage);
    }

    args.parse()
        .map_err(|_| CommandError::InvalidPollId(args.to_owned()))
}

pub fn reminder_confirmation(request: &ReminderRequest) -> String {
    format!(
        "Reminder set for {}: {}",
        request.fire_at.format("%Y-%m-%d %H:%M %Z"),
        request.message
    )
}

pub fn reminder_list(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        return "You have no pending reminders.".to_owned();
    }

    let lines = numbered(reminders.iter().map(|reminder| {
        format!(
            "{}: {}",
            reminder.fire_at.format("%Y-%m-%d %H:%M %Z"),
            reminder.message
        )
    }));
    format!("Your reminders:\n{lines}")
}

/// Poll body. Options are numbered from 1, matching the emoji under the message.
pub fn render_poll(draft: &PollDraft) -> String {
    format!("{}\n\n{}", draft.question, numbered(draft.options.iter()))
}

/// The id `!delete_poll` expects is only known once the poll message is sent.
pub fn with_poll_id(body: &str, message_id: i32) -> String {
    format!("{body}\n\nPoll id: {message_id}")
}

pub fn poll_emoji(option_count: usize) -> &'static [&'static str] {
    &NUMBER_EMOJI[..option_count.min(NUMBER_EMOJI.len())]
}

pub fn poll_deleted(message_id: i32) -> String {
    format!("Poll {message_id} has been deleted.")
}

pub fn summary_failed(error: &impl std::fmt::Display) -> String {
    format!("Error: {error}")
}

pub fn song_queued(song: &str) -> String {
    format!("Added '{song}' to the queue.")
}

pub fn queue_listing(songs: &[String]) -> String {
    if songs.is_empty() {
        "The queue is empty.".to_owned()
    } else {
        format!("Music Queue:\n{}", numbered(songs.iter()))
    }
}

pub fn welcome(name: &str) -> String {
    format!("Welcome to the server, {name}!")
}

pub fn member_joined(mention: &str, joined_at: DateTime<Utc>) -> String {
    format!(
        "Welcome to the server, it is so nice to have you, {mention}! 🎉\n\
         Joined on: {}\n\
         Glad to have you here! Feel free to explore and make yourself at home. 😊",
        joined_at.format("%B %d, %Y")
    )
}

fn numbered(items: impl Iterator<Item = impl std::fmt::Display>) -> String {
    items
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<String>>()
        .join("\n")
}

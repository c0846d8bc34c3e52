use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
};

use crate::{
    commands::{self, Command, CommandError},
    poll::PollHost,
    storage::{MusicQueue, PollStorage, ReminderStorage},
    summarizer::Summarizer,
};

use super::HandlerResult;

const POLL_BUTTONS_PER_ROW: usize = 5;

pub(super) async fn handle_command(
    bot: Bot,
    msg: Message,
    command: Command,
    reminder_storage: Arc<dyn ReminderStorage>,
    poll_storage: Arc<dyn PollStorage>,
    music_queue: Arc<MusicQueue>,
    summarizer: Arc<dyn Summarizer>,
) -> HandlerResult {
    match command {
        Command::Remind(args) => remind(&bot, &msg, &args, reminder_storage.as_ref()).await,
        Command::Reminders => list_reminders(&bot, &msg, reminder_storage.as_ref()).await,
        Command::Poll(args) => create_poll(&bot, &msg, &args, poll_storage.as_ref()).await,
        Command::DeletePoll(args) => delete_poll(&bot, &msg, &args, poll_storage.as_ref()).await,
        Command::Summarize(text) => summarize(&bot, &msg, &text, summarizer.as_ref()).await,
        Command::Play(song) => play(&bot, &msg, song, &music_queue).await,
        Command::Queue => queue(&bot, &msg, &music_queue).await,
        Command::Welcome(name) => reply(&bot, &msg, commands::welcome(&name)).await,
    }
}

async fn reply(bot: &Bot, msg: &Message, text: String) -> HandlerResult {
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

async fn reject(bot: &Bot, msg: &Message, error: CommandError) -> HandlerResult {
    log::debug!("Rejected command input: {}", error);
    reply(bot, msg, error.to_string()).await
}

async fn remind(
    bot: &Bot,
    msg: &Message,
    args: &str,
    storage: &dyn ReminderStorage,
) -> HandlerResult {
    let Some(author) = msg.from.as_ref() else {
        return Ok(());
    };

    let request = match commands::parse_remind_args(args) {
        Ok(request) => request,
        Err(error) => return reject(bot, msg, error).await,
    };
    let confirmation = commands::reminder_confirmation(&request);
    storage
        .add(author.id.0, request.fire_at, request.message)
        .await;

    log::info!(
        "Created reminder. [user_id = {}, fire_at = {}]",
        author.id,
        request.fire_at
    );

    reply(bot, msg, confirmation).await
}

async fn list_reminders(bot: &Bot, msg: &Message, storage: &dyn ReminderStorage) -> HandlerResult {
    let Some(author) = msg.from.as_ref() else {
        return Ok(());
    };

    let reminders = storage.user_reminders(author.id.0).await;
    reply(bot, msg, commands::reminder_list(&reminders)).await
}

async fn create_poll(
    bot: &Bot,
    msg: &Message,
    args: &str,
    storage: &dyn PollStorage,
) -> HandlerResult {
    let draft = match commands::parse_poll_args(args) {
        Ok(draft) => draft,
        Err(error) => return reject(bot, msg, error).await,
    };

    let body = commands::render_poll(&draft);
    let keyboard = poll_keyboard(draft.options.len());
    let poll_message = bot
        .send_message(msg.chat.id, body.as_str())
        .reply_markup(keyboard.clone())
        .await?;

    let host = PollHost::new(msg.chat.id.0, poll_message.id.0);
    storage.create(host, draft.question, draft.options).await?;

    // Editing the text drops the keyboard unless it is sent again.
    bot.edit_message_text(
        msg.chat.id,
        poll_message.id,
        commands::with_poll_id(&body, host.message_id),
    )
    .reply_markup(keyboard)
    .await?;

    log::info!(
        "Created poll. [chat_id = {}, message_id = {}]",
        host.chat_id,
        host.message_id
    );
    Ok(())
}

fn poll_keyboard(option_count: usize) -> InlineKeyboardMarkup {
    let rows = commands::poll_emoji(option_count)
        .chunks(POLL_BUTTONS_PER_ROW)
        .map(|row| {
            row.iter()
                .map(|emoji| InlineKeyboardButton::callback(*emoji, *emoji))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(rows)
}

async fn delete_poll(
    bot: &Bot,
    msg: &Message,
    args: &str,
    storage: &dyn PollStorage,
) -> HandlerResult {
    let message_id = match commands::parse_poll_id(args) {
        Ok(message_id) => message_id,
        Err(error) => return reject(bot, msg, error).await,
    };

    if storage.delete(PollHost::new(msg.chat.id.0, message_id)).await {
        log::info!(
            "Deleted poll. [chat_id = {}, message_id = {}]",
            msg.chat.id,
            message_id
        );
        reply(bot, msg, commands::poll_deleted(message_id)).await?;
    }

    Ok(())
}

async fn summarize(
    bot: &Bot,
    msg: &Message,
    text: &str,
    summarizer: &dyn Summarizer,
) -> HandlerResult {
    let answer = match summarizer.summarize(text).await {
        Ok(summary) => summary,
        Err(error) => {
            log::warn!("Summarization failed: {}", error);
            commands::summary_failed(&error)
        }
    };

    reply(bot, msg, answer).await
}

async fn play(bot: &Bot, msg: &Message, song: String, music_queue: &MusicQueue) -> HandlerResult {
    let confirmation = commands::song_queued(&song);
    music_queue.push(msg.chat.id.0, song).await;

    reply(bot, msg, confirmation).await
}

async fn queue(bot: &Bot, msg: &Message, music_queue: &MusicQueue) -> HandlerResult {
    let songs = music_queue.list(msg.chat.id.0).await;
    reply(bot, msg, commands::queue_listing(&songs)).await
}

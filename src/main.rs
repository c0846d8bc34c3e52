mod appsettings;
mod commands;
mod poll;
mod reminder;
mod scheduling;
mod storage;
mod summarizer;
mod telegram;
mod time_parser;
mod vote_reactor;

use std::{sync::Arc, time::Duration};

use appsettings::AppSettings;
use scheduling::ReminderScheduler;
use storage::{
    InMemoryPollStorage, InMemoryReminderStorage, MusicQueue, PollStorage, ReminderStorage,
};
use summarizer::{GeminiSummarizer, Summarizer};
use telegram::{TelegramDeliveryChannel, TelegramInteractionInterface};
use teloxide::{Bot, prelude::Requester};
use vote_reactor::VoteReactor;

const SCHEDULER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::new()?;
    let bot = Bot::new(settings.telegram.token.clone());

    // Reminders are only polled once the bot is known to be reachable.
    let me = bot.get_me().await?;
    log::info!("Logged in as {}", me.username());

    let reminder_storage: Arc<dyn ReminderStorage> = Arc::new(InMemoryReminderStorage::new());
    let poll_storage: Arc<dyn PollStorage> = Arc::new(InMemoryPollStorage::new());
    let music_queue = Arc::new(MusicQueue::new());
    let summarizer: Arc<dyn Summarizer> = Arc::new(GeminiSummarizer::new(
        settings.gemini.api_key.clone(),
        settings.gemini.model.clone(),
    )?);
    let vote_reactor = Arc::new(VoteReactor::new(poll_storage.clone(), me.id.0));

    let scheduler = ReminderScheduler::new(
        reminder_storage.clone(),
        Arc::new(TelegramDeliveryChannel::new(bot.clone())),
        settings.scheduler.poll_interval(),
    )
    .start();

    TelegramInteractionInterface::start(
        bot,
        reminder_storage,
        poll_storage,
        music_queue,
        summarizer,
        vote_reactor,
    )
    .await;

    scheduler.cancel(SCHEDULER_SHUTDOWN_TIMEOUT).await;
    Ok(())
}

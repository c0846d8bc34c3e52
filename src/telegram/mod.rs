mod command_handlers;
mod delivery;
mod members;
mod reactions;

pub use delivery::TelegramDeliveryChannel;

use std::sync::Arc;

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::{Me, User},
};

use crate::{
    commands::Command,
    storage::{MusicQueue, PollStorage, ReminderStorage},
    summarizer::Summarizer,
    vote_reactor::VoteReactor,
};

type HandlerResult = anyhow::Result<()>;

pub struct TelegramInteractionInterface;
impl TelegramInteractionInterface {
    pub async fn start(
        bot: Bot,
        reminder_storage: Arc<dyn ReminderStorage>,
        poll_storage: Arc<dyn PollStorage>,
        music_queue: Arc<MusicQueue>,
        summarizer: Arc<dyn Summarizer>,
        vote_reactor: Arc<VoteReactor>,
    ) {
        log::info!("Starting Telegram interaction interface");

        Dispatcher::builder(bot, schema())
            .dependencies(dptree::deps![
                reminder_storage,
                poll_storage,
                music_queue,
                summarizer,
                vote_reactor
            ])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await
    }
}

fn schema() -> UpdateHandler<anyhow::Error> {
    let message_handler = Update::filter_message()
        .branch(dptree::filter_map(new_members).endpoint(members::welcome_new_members))
        .branch(dptree::filter_map(command).endpoint(command_handlers::handle_command));

    dptree::entry()
        .branch(message_handler)
        .branch(Update::filter_edited_message().endpoint(members::log_edit))
        .branch(Update::filter_callback_query().endpoint(reactions::handle_poll_reaction))
}

fn new_members(msg: Message) -> Option<Vec<User>> {
    msg.new_chat_members().map(<[User]>::to_vec)
}

fn command(msg: Message, me: Me) -> Option<Command> {
    if msg.from.as_ref().is_some_and(|author| author.id == me.id) {
        return None;
    }

    msg.text().and_then(Command::parse)
}

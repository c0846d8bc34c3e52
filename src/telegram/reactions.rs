use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{MaybeInaccessibleMessage, Message},
};

use crate::{
    poll::PollHost,
    vote_reactor::{ReactionEvent, ReactionOutcome, VoteReactor},
};

use super::HandlerResult;

/// Poll buttons carry their numeral emoji as callback data; a press counts as a reaction.
pub(super) async fn handle_poll_reaction(
    bot: Bot,
    query: CallbackQuery,
    vote_reactor: Arc<VoteReactor>,
) -> HandlerResult {
    let outcome = match reaction_event(&query) {
        Some(event) => vote_reactor.handle(&event).await,
        None => ReactionOutcome::UnknownPoll,
    };

    match outcome {
        ReactionOutcome::Recorded { option_index } => {
            log::debug!(
                "Recorded vote. [user_id = {}, option = {}]",
                query.from.id,
                option_index + 1
            );
            bot.answer_callback_query(query.id)
                .text(format!("Voted for option {}", option_index + 1))
                .await?;
        }
        ignored => {
            log::debug!("Ignored poll reaction: {:?}", ignored);
            bot.answer_callback_query(query.id).await?;
        }
    }

    Ok(())
}

fn reaction_event(query: &CallbackQuery) -> Option<ReactionEvent> {
    let message = try_get_message_from_query(query)?;
    let emoji = query.data.clone()?;

    Some(ReactionEvent {
        host: PollHost::new(message.chat.id.0, message.id.0),
        emoji,
        reactor: query.from.id.0,
    })
}

fn try_get_message_from_query(query: &CallbackQuery) -> Option<&Message> {
    query.message.as_ref().and_then(|msg| match msg {
        MaybeInaccessibleMessage::Inaccessible(_) => None,
        MaybeInaccessibleMessage::Regular(message) => Some(message.as_ref()),
    })
}

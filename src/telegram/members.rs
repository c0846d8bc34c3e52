use teloxide::{
    prelude::*,
    types::{Me, User},
};

use crate::commands;

use super::HandlerResult;

pub(super) async fn welcome_new_members(
    bot: Bot,
    msg: Message,
    members: Vec<User>,
    me: Me,
) -> HandlerResult {
    for member in members.iter().filter(|member| member.id != me.id) {
        let mention = member.mention().unwrap_or_else(|| member.full_name());
        log::info!(
            "Member joined. [chat_id = {}, user_id = {}]",
            msg.chat.id,
            member.id
        );

        bot.send_message(msg.chat.id, commands::member_joined(&mention, msg.date))
            .await?;
    }

    Ok(())
}

/// Telegram only sends the new text, so that is all that gets logged.
pub(super) async fn log_edit(msg: Message) -> HandlerResult {
    if let Some(text) = msg.text() {
        log::info!(
            "Message edited. [chat_id = {}, message_id = {}, text = {}]",
            msg.chat.id,
            msg.id.0,
            text
        );
    }

    Ok(())
}

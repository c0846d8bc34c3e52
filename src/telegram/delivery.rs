use async_trait::async_trait;
use teloxide::{ApiError, RequestError, prelude::*, types::UserId};

use crate::{
    reminder::UserId as ReminderUserId,
    scheduling::{DeliveryError, ReminderDeliveryChannel},
};

/// Delivers reminders as direct messages to the owner's private chat.
pub struct TelegramDeliveryChannel {
    bot: Bot,
}

impl TelegramDeliveryChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReminderDeliveryChannel for TelegramDeliveryChannel {
    async fn deliver(&self, user_id: ReminderUserId, text: &str) -> Result<(), DeliveryError> {
        let chat_id = ChatId::from(UserId(user_id));

        match self.bot.send_message(chat_id, text).await {
            Ok(_) => Ok(()),
            Err(error) => Err(map_delivery_error(user_id, error)),
        }
    }
}

fn map_delivery_error(user_id: ReminderUserId, error: RequestError) -> DeliveryError {
    match error {
        RequestError::Api(
            ApiError::BotBlocked | ApiError::CantInitiateConversation | ApiError::UserDeactivated,
        ) => DeliveryError::Forbidden(user_id),
        error => DeliveryError::Transport(error.into()),
    }
}

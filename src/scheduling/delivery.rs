use async_trait::async_trait;
use thiserror::Error;

use crate::reminder::UserId;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("User {0} does not accept direct messages")]
    Forbidden(UserId),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[async_trait]
pub trait ReminderDeliveryChannel: Send + Sync + 'static {
    async fn deliver(&self, user_id: UserId, text: &str) -> Result<(), DeliveryError>;
}

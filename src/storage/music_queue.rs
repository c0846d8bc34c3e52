use std::collections::HashMap;

use tokio::sync::RwLock;

pub type ChatKey = i64;

/// Song names requested per chat. Nothing is ever played.
pub struct MusicQueue {
    queues: RwLock<HashMap<ChatKey, Vec<String>>>,
}

impl MusicQueue {
    pub fn new() -> Self {
        MusicQueue {
            queues: RwLock::new(HashMap::new()),
        }
    }

    pub async fn push(&self, chat: ChatKey, song: String) {
        self.queues.write().await.entry(chat).or_default().push(song);
    }

    pub async fn list(&self, chat: ChatKey) -> Vec<String> {
        self.queues
            .read()
            .await
            .get(&chat)
            .cloned()
            .unwrap_or_default()
    }
}

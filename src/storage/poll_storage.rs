use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::poll::{MAX_POLL_OPTIONS, MIN_POLL_OPTIONS, Poll, PollHost, VoterId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("A poll needs at least 2 options, got {0}.")]
    TooFewOptions(usize),

    #[error("A poll can have at most 10 options, got {0}.")]
    TooManyOptions(usize),
}

pub fn validate_options(options: &[String]) -> Result<(), PollError> {
    match options.len() {
        n if n < MIN_POLL_OPTIONS => Err(PollError::TooFewOptions(n)),
        n if n > MAX_POLL_OPTIONS => Err(PollError::TooManyOptions(n)),
        _ => Ok(()),
    }
}

#[async_trait]
pub trait PollStorage: Send + Sync {
    async fn create(
        &self,
        host: PollHost,
        question: String,
        options: Vec<String>,
    ) -> Result<(), PollError>;

    async fn get(&self, host: PollHost) -> Option<Poll>;

    /// Overwrites the voter's previous ballot. Returns `false` when the poll is
    /// unknown or the option is out of range, leaving the poll untouched.
    async fn record_vote(&self, host: PollHost, voter: VoterId, option_index: usize) -> bool;

    async fn delete(&self, host: PollHost) -> bool;

    async fn tally(&self, host: PollHost) -> Option<Vec<usize>>;
}

pub struct InMemoryPollStorage {
    polls: RwLock<HashMap<PollHost, Poll>>,
}

impl InMemoryPollStorage {
    pub fn new() -> Self {
        InMemoryPollStorage {
            polls: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PollStorage for InMemoryPollStorage {
    async fn create(
        &self,
        host: PollHost,
        question: String,
        options: Vec<String>,
    ) -> Result<(), PollError> {
        validate_options(&options)?;

        self.polls
            .write()
            .await
            .insert(host, Poll::new(host, question, options));

        Ok(())
    }

    async fn get(&self, host: PollHost) -> Option<Poll> {
        self.polls.read().await.get(&host).cloned()
    }

    async fn record_vote(&self, host: PollHost, voter: VoterId, option_index: usize) -> bool {
        let mut polls = self.polls.write().await;
        match polls.get_mut(&host) {
            Some(poll) if option_index < poll.options.len() => {
                poll.ballots.insert(voter, option_index);
                true
            }
            _ => false,
        }
    }

    async fn delete(&self, host: PollHost) -> bool {
        self.polls.write().await.remove(&host).is_some()
    }

    async fn tally(&self, host: PollHost) -> Option<Vec<usize>> {
        self.polls.read().await.get(&host).map(Poll::tally)
    }
}

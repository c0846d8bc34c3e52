use std::sync::Arc;

use crate::{
    poll::{PollHost, VoterId},
    storage::PollStorage,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub host: PollHost,
    pub emoji: String,
    pub reactor: VoterId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    Recorded { option_index: usize },
    OwnReaction,
    UnknownPoll,
    UnknownEmoji,
}

/// Turns reactions on poll messages into ballots.
pub struct VoteReactor {
    polls: Arc<dyn PollStorage>,
    bot_id: VoterId,
}

impl VoteReactor {
    pub fn new(polls: Arc<dyn PollStorage>, bot_id: VoterId) -> Self {
        Self { polls, bot_id }
    }

    pub async fn handle(&self, event: &ReactionEvent) -> ReactionOutcome {
        if event.reactor == self.bot_id {
            return ReactionOutcome::OwnReaction;
        }

        let Some(poll) = self.polls.get(event.host).await else {
            return ReactionOutcome::UnknownPoll;
        };

        let Some(option_index) = poll.option_for_emoji(&event.emoji) else {
            return ReactionOutcome::UnknownEmoji;
        };

        // The poll may have been deleted since the lookup; the store ignores the vote then.
        if self
            .polls
            .record_vote(poll.host, event.reactor, option_index)
            .await
        {
            ReactionOutcome::Recorded { option_index }
        } else {
            ReactionOutcome::UnknownPoll
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::InMemoryPollStorage;

    use super::*;

    const BOT_ID: VoterId = 999;
    const HOST: PollHost = PollHost {
        chat_id: -100,
        message_id: 5,
    };

    async fn reactor() -> (VoteReactor, Arc<InMemoryPollStorage>) {
        let polls = Arc::new(InMemoryPollStorage::new());
        polls
            .create(
                HOST,
                "Best editor?".to_owned(),
                vec!["vim".to_owned(), "emacs".to_owned()],
            )
            .await
            .unwrap();

        (VoteReactor::new(polls.clone(), BOT_ID), polls)
    }

    fn reaction(emoji: &str, reactor: VoterId) -> ReactionEvent {
        ReactionEvent {
            host: HOST,
            emoji: emoji.to_owned(),
            reactor,
        }
    }

    #[tokio::test]
    async fn numeral_reaction_records_ballot() {
        let (reactor, polls) = reactor().await;

        let outcome = reactor.handle(&reaction("2️⃣", 1)).await;

        assert_eq!(outcome, ReactionOutcome::Recorded { option_index: 1 });
        assert_eq!(polls.get(HOST).await.unwrap().ballots[&1], 1);
    }

    #[tokio::test]
    async fn changing_reaction_moves_vote() {
        let (reactor, polls) = reactor().await;

        reactor.handle(&reaction("1️⃣", 1)).await;
        reactor.handle(&reaction("2️⃣", 1)).await;

        assert_eq!(polls.tally(HOST).await, Some(vec![0, 1]));
    }

    #[tokio::test]
    async fn bot_reactions_are_not_votes() {
        let (reactor, polls) = reactor().await;

        let outcome = reactor.handle(&reaction("1️⃣", BOT_ID)).await;

        assert_eq!(outcome, ReactionOutcome::OwnReaction);
        assert!(polls.get(HOST).await.unwrap().ballots.is_empty());
    }

    #[tokio::test]
    async fn emoji_outside_poll_range_is_ignored() {
        let (reactor, polls) = reactor().await;

        assert_eq!(
            reactor.handle(&reaction("3️⃣", 1)).await,
            ReactionOutcome::UnknownEmoji
        );
        assert_eq!(
            reactor.handle(&reaction("🎉", 1)).await,
            ReactionOutcome::UnknownEmoji
        );
        assert!(polls.get(HOST).await.unwrap().ballots.is_empty());
    }

    #[tokio::test]
    async fn reactions_on_other_messages_are_ignored() {
        let (reactor, _) = reactor().await;
        let mut event = reaction("1️⃣", 1);
        event.host = PollHost::new(HOST.chat_id, 6);

        assert_eq!(reactor.handle(&event).await, ReactionOutcome::UnknownPoll);
    }

    #[tokio::test]
    async fn deleted_poll_stops_accepting_reactions() {
        let (reactor, polls) = reactor().await;
        polls.delete(HOST).await;

        assert_eq!(
            reactor.handle(&reaction("1️⃣", 1)).await,
            ReactionOutcome::UnknownPoll
        );
    }
}

use std::collections::HashMap;

use crate::reminder::UserId;

/// Reaction affordances offered under a poll, in option order.
pub const NUMBER_EMOJI: [&str; 10] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟",
];

pub const MIN_POLL_OPTIONS: usize = 2;
pub const MAX_POLL_OPTIONS: usize = NUMBER_EMOJI.len();

pub type VoterId = UserId;

/// Identifies the message a poll is rendered in. Message ids are only unique per chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollHost {
    pub chat_id: i64,
    pub message_id: i32,
}

impl PollHost {
    pub fn new(chat_id: i64, message_id: i32) -> Self {
        Self {
            chat_id,
            message_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poll {
    pub host: PollHost,
    pub question: String,
    pub options: Vec<String>,
    pub ballots: HashMap<VoterId, usize>,
}

impl Poll {
    pub fn new(host: PollHost, question: String, options: Vec<String>) -> Self {
        Self {
            host,
            question,
            options,
            ballots: HashMap::new(),
        }
    }

    /// Option index for a numeral emoji, if it belongs to this poll.
    pub fn option_for_emoji(&self, emoji: &str) -> Option<usize> {
        NUMBER_EMOJI
            .iter()
            .take(self.options.len())
            .position(|candidate| *candidate == emoji)
    }

    pub fn tally(&self) -> Vec<usize> {
        let mut counts = vec![0; self.options.len()];
        for index in self.ballots.values() {
            counts[*index] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll_with_options(count: usize) -> Poll {
        let options = (0..count).map(|i| format!("option {i}")).collect();
        Poll::new(PollHost::new(1, 1), "Question".to_owned(), options)
    }

    #[test]
    fn emoji_maps_to_option_position() {
        let poll = poll_with_options(3);

        assert_eq!(poll.option_for_emoji("1️⃣"), Some(0));
        assert_eq!(poll.option_for_emoji("3️⃣"), Some(2));
    }

    #[test]
    fn emoji_past_last_option_is_ignored() {
        let poll = poll_with_options(2);

        assert_eq!(poll.option_for_emoji("3️⃣"), None);
        assert_eq!(poll.option_for_emoji("👍"), None);
    }

    #[test]
    fn tenth_option_uses_keycap_ten() {
        let poll = poll_with_options(10);

        assert_eq!(poll.option_for_emoji("🔟"), Some(9));
    }
}

use std::sync::Arc;
use std::time::Duration;

use serenity::all::UserId;
use tracing::{debug, info};

use crate::constants::timeouts::MENTION_REASON_MIN_CHARS;
use crate::services::moderation::mute_store::MuteStore;
use crate::utils::mentions;

/// What the gate needs to know about an inbound message
#[derive(Debug, Clone, Copy)]
pub struct MessageFacts<'a> {
    pub author_id: UserId,
    pub author_is_bot: bool,
    pub author_is_admin: bool,
    pub mentions_users: bool,
    pub content: &'a str,
}

/// Outcome for one message, first matching rule wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Sent by a bot
    Ignore,
    /// Author is muted: delete the message and remind them how long is left
    Suppress { remaining_secs: u64 },
    /// Mention without a reason. Admins are `exempt`: warned, message kept.
    Penalize { exempt: bool },
    /// Nothing to do, hand over to command dispatch
    Pass,
}

impl Verdict {
    pub fn deletes_message(&self) -> bool {
        matches!(
            self,
            Verdict::Suppress { .. } | Verdict::Penalize { exempt: false }
        )
    }

    pub fn dispatches_commands(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Decides per message whether to block, penalize, or let it through
#[derive(Debug, Clone)]
pub struct MessageGate {
    store: Arc<MuteStore>,
    mute_duration: Duration,
}

impl MessageGate {
    pub fn new(store: Arc<MuteStore>, mute_duration: Duration) -> Self {
        Self {
            store,
            mute_duration,
        }
    }

    pub fn store(&self) -> &Arc<MuteStore> {
        &self.store
    }

    pub fn mute_duration(&self) -> Duration {
        self.mute_duration
    }

    /// Run the message through the gate, updating the mute table as needed
    pub fn evaluate(&self, facts: &MessageFacts<'_>) -> Verdict {
        if facts.author_is_bot {
            return Verdict::Ignore;
        }

        if let Some(remaining_secs) = self.enforce_mute(facts) {
            return Verdict::Suppress { remaining_secs };
        }

        if self.is_unexplained_mention(facts) {
            // Admins get a record too, but enforce_mute never blocks them
            let created = self.store.impose(facts.author_id, self.mute_duration);
            info!(
                "User {} mentioned without a reason (admin: {}, new mute: {})",
                facts.author_id, facts.author_is_admin, created
            );
            return Verdict::Penalize {
                exempt: facts.author_is_admin,
            };
        }

        Verdict::Pass
    }

    /// Read-only version of [`evaluate`](Self::evaluate) used to veto commands.
    /// True only when the gate would let the message reach command dispatch.
    pub fn admits_command(&self, facts: &MessageFacts<'_>) -> bool {
        if facts.author_is_bot {
            return false;
        }
        if !facts.author_is_admin && self.store.remaining_seconds(facts.author_id) > 0 {
            return false;
        }
        !self.is_unexplained_mention(facts)
    }

    /// Remaining seconds if the author's message must be blocked.
    /// A lapsed record the sweep hasn't reached yet is released here.
    fn enforce_mute(&self, facts: &MessageFacts<'_>) -> Option<u64> {
        let record = self.store.get(facts.author_id)?;
        let remaining = record.remaining_seconds(self.store.now());

        if remaining == 0 {
            if self.store.release_lapsed(facts.author_id) {
                debug!("Lazily released lapsed mute for user {}", facts.author_id);
            }
            return None;
        }

        if facts.author_is_admin {
            return None;
        }

        Some(remaining)
    }

    fn is_unexplained_mention(&self, facts: &MessageFacts<'_>) -> bool {
        facts.mentions_users && mentions::reason_length(facts.content) <= MENTION_REASON_MIN_CHARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::moderation::clock::ManualClock;

    const MUTE: Duration = Duration::from_secs(60);
    const USER: UserId = UserId::new(1001);
    const ADMIN: UserId = UserId::new(2002);

    fn setup() -> (Arc<ManualClock>, MessageGate) {
        let clock = Arc::new(ManualClock::default());
        let store = Arc::new(MuteStore::with_clock(clock.clone()));
        (clock, MessageGate::new(store, MUTE))
    }

    fn user_msg(content: &str) -> MessageFacts<'_> {
        MessageFacts {
            author_id: USER,
            author_is_bot: false,
            author_is_admin: false,
            mentions_users: content.contains("<@"),
            content,
        }
    }

    fn admin_msg(content: &str) -> MessageFacts<'_> {
        MessageFacts {
            author_id: ADMIN,
            author_is_admin: true,
            ..user_msg(content)
        }
    }

    #[test]
    fn test_bots_are_ignored() {
        let (_clock, gate) = setup();
        let facts = MessageFacts {
            author_is_bot: true,
            ..user_msg("hey <@123>")
        };

        assert_eq!(gate.evaluate(&facts), Verdict::Ignore);
        assert!(gate.store().is_empty());
        assert!(!gate.admits_command(&facts));
    }

    #[test]
    fn test_unexplained_mention_mutes_user() {
        let (_clock, gate) = setup();

        let verdict = gate.evaluate(&user_msg("hey <@123>"));

        assert_eq!(verdict, Verdict::Penalize { exempt: false });
        assert!(verdict.deletes_message());
        assert!(!verdict.dispatches_commands());
        assert!(gate.store().is_muted(USER));
        assert_eq!(gate.store().remaining_seconds(USER), 60);
    }

    #[test]
    fn test_explained_mention_passes() {
        let (_clock, gate) = setup();

        let verdict = gate.evaluate(&user_msg("hey <@123>, can you help me with the deploy?"));

        assert_eq!(verdict, Verdict::Pass);
        assert!(verdict.dispatches_commands());
        assert!(!gate.store().is_muted(USER));
    }

    #[test]
    fn test_short_message_without_mentions_passes() {
        let (_clock, gate) = setup();
        assert_eq!(gate.evaluate(&user_msg("ok")), Verdict::Pass);
        assert!(gate.store().is_empty());
    }

    #[test]
    fn test_threshold_is_six_characters() {
        let (_clock, gate) = setup();
        assert_eq!(
            gate.evaluate(&user_msg("<@5> abcdef")),
            Verdict::Penalize { exempt: false }
        );

        let (_clock, gate) = setup();
        assert_eq!(gate.evaluate(&user_msg("<@5> abcdefg")), Verdict::Pass);
    }

    #[test]
    fn test_muted_user_is_suppressed_with_remaining_time() {
        let (clock, gate) = setup();
        gate.evaluate(&user_msg("hey <@123>"));

        clock.advance(chrono::Duration::seconds(15));
        let verdict = gate.evaluate(&user_msg("sorry, I wanted to ask about the release"));

        assert_eq!(verdict, Verdict::Suppress { remaining_secs: 45 });
        assert!(verdict.deletes_message());
        assert!(!verdict.dispatches_commands());
    }

    #[test]
    fn test_repeat_offense_while_muted_does_not_extend() {
        let (clock, gate) = setup();
        gate.evaluate(&user_msg("hey <@123>"));
        let unmute_at = gate.store().get(USER).unwrap().unmute_at;

        clock.advance(chrono::Duration::seconds(10));
        assert_eq!(
            gate.evaluate(&user_msg("yo <@123>")),
            Verdict::Suppress { remaining_secs: 50 }
        );
        assert_eq!(gate.store().get(USER).unwrap().unmute_at, unmute_at);
    }

    #[test]
    fn test_lapsed_mute_is_released_lazily() {
        let (clock, gate) = setup();
        gate.evaluate(&user_msg("hey <@123>"));

        clock.advance(chrono::Duration::seconds(60));
        assert!(gate.store().is_muted(USER));

        let verdict = gate.evaluate(&user_msg("thanks for waiting everyone"));

        assert_eq!(verdict, Verdict::Pass);
        assert!(!gate.store().is_muted(USER));
    }

    #[test]
    fn test_sub_second_remainder_counts_as_lapsed() {
        let (clock, gate) = setup();
        gate.evaluate(&user_msg("hey <@123>"));
        clock.advance(chrono::Duration::milliseconds(59_600));

        assert_eq!(gate.evaluate(&user_msg("ok")), Verdict::Pass);
        assert!(!gate.store().is_muted(USER));
    }

    #[test]
    fn test_lapsed_mute_then_new_offense_mutes_again() {
        let (clock, gate) = setup();
        gate.evaluate(&user_msg("hey <@123>"));
        clock.advance(chrono::Duration::seconds(61));

        let verdict = gate.evaluate(&user_msg("hi <@123>"));

        assert_eq!(verdict, Verdict::Penalize { exempt: false });
        assert_eq!(gate.store().remaining_seconds(USER), 60);
    }

    #[test]
    fn test_admin_is_warned_but_not_blocked() {
        let (_clock, gate) = setup();

        let verdict = gate.evaluate(&admin_msg("ok <@999>"));

        assert_eq!(verdict, Verdict::Penalize { exempt: true });
        assert!(!verdict.deletes_message());
        assert!(!verdict.dispatches_commands());
        assert!(gate.store().is_muted(ADMIN));

        // The record exists but the admin's next message still goes through
        let next = gate.evaluate(&admin_msg("moving on to the agenda now"));
        assert_eq!(next, Verdict::Pass);
        assert!(gate.admits_command(&admin_msg("moving on to the agenda now")));
    }

    #[test]
    fn test_admits_command_matches_evaluate() {
        let (_clock, gate) = setup();

        assert!(gate.admits_command(&user_msg("!say hello world")));
        assert!(!gate.admits_command(&user_msg("!say <@1>")));
        assert!(gate.store().is_empty());

        gate.evaluate(&user_msg("hey <@123>"));
        assert!(!gate.admits_command(&user_msg("!say a proper sentence")));
    }

    #[test]
    fn test_admits_command_after_lapse() {
        let (clock, gate) = setup();
        gate.evaluate(&user_msg("hey <@123>"));
        clock.advance(chrono::Duration::seconds(60));

        assert!(gate.admits_command(&user_msg("!say a proper sentence")));
    }
}

use std::sync::Arc;

use serenity::all::{ChannelId, Context, VoiceState};
use tracing::debug;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::utils::formatting::{bold, mention_channel, mention_user};

/// Channel change carried by a voice state update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTransition {
    Joined(ChannelId),
    Left(ChannelId),
    Moved { from: ChannelId, to: ChannelId },
}

impl VoiceTransition {
    /// None when the user stayed put (mute, deafen, stream toggles)
    pub fn between(old: Option<ChannelId>, new: Option<ChannelId>) -> Option<Self> {
        match (old, new) {
            (None, Some(to)) => Some(Self::Joined(to)),
            (Some(from), None) => Some(Self::Left(from)),
            (Some(from), Some(to)) if from != to => Some(Self::Moved { from, to }),
            _ => None,
        }
    }
}

pub async fn handle_voice_state_update(
    ctx: &Context,
    data: &Arc<Data>,
    old: Option<&VoiceState>,
    new: &VoiceState,
) -> Result<(), Error> {
    let log_channel = match data.settings.voice_log_channel_id {
        Some(id) => ChannelId::new(id),
        None => return Ok(()),
    };

    let old_channel = old.and_then(|o| o.channel_id);
    let transition = match VoiceTransition::between(old_channel, new.channel_id) {
        Some(t) => t,
        None => return Ok(()),
    };

    let member_name = new
        .member
        .as_ref()
        .map(|m| m.display_name().to_string())
        .unwrap_or_else(|| mention_user(new.user_id));

    let line = match transition {
        VoiceTransition::Joined(to) => joined_line(&member_name, &channel_name(ctx, to).await),
        VoiceTransition::Left(from) => left_line(&member_name, &channel_name(ctx, from).await),
        VoiceTransition::Moved { from, to } => moved_line(
            &member_name,
            &channel_name(ctx, from).await,
            &channel_name(ctx, to).await,
        ),
    };

    debug!("Voice log: {}", line);
    log_channel.say(ctx, line).await?;

    Ok(())
}

async fn channel_name(ctx: &Context, channel_id: ChannelId) -> String {
    channel_id
        .name(ctx)
        .await
        .unwrap_or_else(|_| mention_channel(channel_id))
}

fn joined_line(member: &str, channel: &str) -> String {
    format!("🔊 {} joined voice channel {}.", member, bold(channel))
}

fn left_line(member: &str, channel: &str) -> String {
    format!("🔇 {} left voice channel {}.", member, bold(channel))
}

fn moved_line(member: &str, from: &str, to: &str) -> String {
    format!("🔄 {} moved from {} to {}.", member, bold(from), bold(to))
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ChannelId = ChannelId::new(10);
    const B: ChannelId = ChannelId::new(20);

    #[test]
    fn test_transitions() {
        assert_eq!(VoiceTransition::between(None, Some(A)), Some(VoiceTransition::Joined(A)));
        assert_eq!(VoiceTransition::between(Some(A), None), Some(VoiceTransition::Left(A)));
        assert_eq!(
            VoiceTransition::between(Some(A), Some(B)),
            Some(VoiceTransition::Moved { from: A, to: B })
        );
    }

    #[test]
    fn test_no_transition_when_channel_unchanged() {
        assert_eq!(VoiceTransition::between(Some(A), Some(A)), None);
        assert_eq!(VoiceTransition::between(None, None), None);
    }

    #[test]
    fn test_log_lines() {
        assert_eq!(joined_line("Ana", "Lounge"), "🔊 Ana joined voice channel **Lounge**.");
        assert_eq!(left_line("Ana", "Lounge"), "🔇 Ana left voice channel **Lounge**.");
        assert_eq!(
            moved_line("Ana", "Lounge", "Gaming"),
            "🔄 Ana moved from **Lounge** to **Gaming**."
        );
    }
}

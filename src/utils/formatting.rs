use serenity::all::{ChannelId, UserId};

/// Format a user mention
pub fn mention_user(user_id: UserId) -> String {
    format!("<@{}>", user_id)
}

/// Format a channel mention
pub fn mention_channel(channel_id: ChannelId) -> String {
    format!("<#{}>", channel_id)
}

/// Wrap text in Discord bold markers
pub fn bold(text: &str) -> String {
    format!("**{}**", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions() {
        assert_eq!(mention_user(UserId::new(42)), "<@42>");
        assert_eq!(mention_channel(ChannelId::new(7)), "<#7>");
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold("General"), "**General**");
    }
}

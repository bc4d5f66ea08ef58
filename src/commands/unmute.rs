use poise::serenity_prelude::{User, UserId};
use tracing::info;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::utils::formatting::mention_user;

/// Lift a mention mute before it expires
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "ADMINISTRATOR"
)]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "User to unmute"] user: User,
) -> Result<(), Error> {
    let released = ctx.data().mute_store.release(user.id);

    if released {
        info!("User {} unmuted early by {}", user.id, ctx.author().id);
    }

    let description = unmute_announcement(user.id, ctx.author().id, released);
    let embed = if released {
        embeds::success_embed().title("User Unmuted").description(description)
    } else {
        embeds::info_embed().title("Not Muted").description(description)
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

fn unmute_announcement(target: UserId, invoker: UserId, released: bool) -> String {
    if released {
        format!(
            "✅ {} has been unmuted early by {}.",
            mention_user(target),
            mention_user(invoker)
        )
    } else {
        format!("ℹ️ {} is not muted.", mention_user(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announcement_when_released() {
        let text = unmute_announcement(UserId::new(5), UserId::new(7), true);
        assert_eq!(text, "✅ <@5> has been unmuted early by <@7>.");
    }

    #[test]
    fn test_announcement_when_not_muted() {
        let text = unmute_announcement(UserId::new(5), UserId::new(7), false);
        assert_eq!(text, "ℹ️ <@5> is not muted.");
    }
}

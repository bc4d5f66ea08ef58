pub mod embed;
pub mod say;
pub mod unmute;

use tracing::{debug, warn};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::services::moderation::message_gate::MessageFacts;
use crate::utils::permissions;

/// Framework-wide command check: a command only runs if the message gate
/// would have let its invoking message through.
pub async fn gate_check(ctx: Context<'_>) -> Result<bool, Error> {
    let guild_id = match ctx.guild_id() {
        Some(id) => id,
        None => return Ok(true),
    };
    let author = ctx.author();
    let author_is_admin = permissions::is_admin(ctx.serenity_context(), guild_id, author.id).await;

    let (content, mentions_users) = match ctx {
        poise::Context::Prefix(prefix_ctx) => (
            prefix_ctx.msg.content.as_str(),
            !prefix_ctx.msg.mentions.is_empty(),
        ),
        poise::Context::Application(_) => ("", false),
    };

    let facts = MessageFacts {
        author_id: author.id,
        author_is_bot: author.bot,
        author_is_admin,
        mentions_users,
        content,
    };

    let admitted = ctx.data().gate.admits_command(&facts);
    if !admitted {
        debug!("Blocked command {} from {}", ctx.command().name, author.id);
    }
    Ok(admitted)
}

/// Remove the prefix invocation, or acknowledge a slash invocation privately
pub(crate) async fn consume_invocation(ctx: Context<'_>) -> Result<(), Error> {
    match ctx {
        poise::Context::Prefix(prefix_ctx) => {
            if let Err(e) = prefix_ctx.msg.delete(ctx.serenity_context()).await {
                warn!("Failed to delete invoking message {}: {:?}", prefix_ctx.msg.id, e);
            }
        }
        poise::Context::Application(_) => {
            ctx.send(
                poise::CreateReply::default()
                    .content("Sent.")
                    .ephemeral(true),
            )
            .await?;
        }
    }
    Ok(())
}

use crate::bot::data::Context;
use crate::bot::error::Error;

/// Make the bot say something
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES"
)]
pub async fn say(
    ctx: Context<'_>,
    #[description = "Text to send"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    ctx.channel_id().say(ctx.serenity_context(), text).await?;
    super::consume_invocation(ctx).await?;

    Ok(())
}

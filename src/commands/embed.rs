use serenity::all::{CreateEmbed, CreateMessage};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;

/// Send text as a colored embed
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES"
)]
pub async fn embed(
    ctx: Context<'_>,
    #[description = "Hex like #ff8800, or a name like red or dark_teal"] color: String,
    #[description = "Embed text"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    let embed = CreateEmbed::new()
        .description(text)
        .color(embeds::parse_color(&color));

    ctx.channel_id()
        .send_message(ctx.serenity_context(), CreateMessage::new().embed(embed))
        .await?;
    super::consume_invocation(ctx).await?;

    Ok(())
}

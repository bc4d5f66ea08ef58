use std::sync::Arc;

use serenity::all::{ChannelId, Context, Member, User};
use tracing::debug;

use crate::bot::data::Data;
use crate::bot::error::Error;

/// Post a line in the leave log when someone leaves the server
pub async fn handle_member_removal(
    ctx: &Context,
    data: &Arc<Data>,
    user: &User,
    member: Option<&Member>,
) -> Result<(), Error> {
    let log_channel = match data.settings.leave_log_channel_id {
        Some(id) => ChannelId::new(id),
        None => return Ok(()),
    };

    let name = member
        .map(|m| m.display_name().to_string())
        .unwrap_or_else(|| user.global_name.clone().unwrap_or_else(|| user.name.clone()));

    debug!("User {} left, logging to {}", user.id, log_channel);
    log_channel.say(ctx, leave_line(&name)).await?;

    Ok(())
}

fn leave_line(name: &str) -> String {
    format!("❌ {} left the server.", name)
}

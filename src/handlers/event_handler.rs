use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{debug, error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::handlers::{member_log, message, voice_log};

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::Message { new_message } => {
            if let Err(e) = message::handle_message(ctx, data, new_message).await {
                error!("Message handler error: {:?}", e);
            }
        }

        FullEvent::VoiceStateUpdate { old, new } => {
            debug!("Voice state update: {:?} -> {:?}", old, new);
            if let Err(e) =
                voice_log::handle_voice_state_update(ctx, data, old.as_ref(), new).await
            {
                error!("Voice log handler error: {:?}", e);
            }
        }

        FullEvent::GuildMemberRemoval {
            user,
            member_data_if_available,
            ..
        } => {
            if let Err(e) = member_log::handle_member_removal(
                ctx,
                data,
                user,
                member_data_if_available.as_ref(),
            )
            .await
            {
                error!("Leave log handler error: {:?}", e);
            }
        }

        _ => {}
    }

    Ok(())
}

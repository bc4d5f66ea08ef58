use std::sync::Arc;

use serenity::all::{Context, Message, UserId};
use tracing::{debug, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::timeouts::{format_duration, MUTE_WARNING_DELETE_AFTER};
use crate::services::moderation::message_gate::{MessageFacts, Verdict};
use crate::utils::formatting::{bold, mention_user};
use crate::utils::permissions;

/// Run every guild message through the mute gate and carry out its verdict.
/// Commands are dispatched by poise; its command check consults the same gate.
pub async fn handle_message(ctx: &Context, data: &Arc<Data>, msg: &Message) -> Result<(), Error> {
    if msg.author.bot {
        return Ok(());
    }

    let guild_id = match msg.guild_id {
        Some(id) => id,
        None => return Ok(()), // DMs are not moderated
    };

    let author_is_admin = permissions::is_admin(ctx, guild_id, msg.author.id).await;

    let facts = MessageFacts {
        author_id: msg.author.id,
        author_is_bot: msg.author.bot,
        author_is_admin,
        mentions_users: !msg.mentions.is_empty(),
        content: &msg.content,
    };

    let verdict = data.gate.evaluate(&facts);

    if verdict.deletes_message() {
        if let Err(e) = msg.delete(ctx).await {
            warn!("Failed to delete message {} from {}: {:?}", msg.id, msg.author.id, e);
        }
    }

    match verdict {
        Verdict::Ignore | Verdict::Pass => {}

        Verdict::Suppress { remaining_secs } => {
            debug!(
                "Suppressed message from muted user {} ({}s left)",
                msg.author.id, remaining_secs
            );
            send_mute_reminder(ctx, msg, remaining_secs).await?;
        }

        Verdict::Penalize { exempt } => {
            let text = penalty_warning(msg.author.id, exempt, &format_duration(data.gate.mute_duration()));
            msg.channel_id.say(ctx, text).await?;
        }
    }

    Ok(())
}

/// Short-lived reminder, removed again after a few seconds
async fn send_mute_reminder(ctx: &Context, msg: &Message, remaining_secs: u64) -> Result<(), Error> {
    let reminder = msg
        .channel_id
        .say(ctx, mute_reminder(msg.author.id, remaining_secs))
        .await?;

    let http = ctx.http.clone();
    tokio::spawn(async move {
        tokio::time::sleep(MUTE_WARNING_DELETE_AFTER).await;
        if let Err(e) = reminder.delete(&*http).await {
            debug!("Could not delete mute reminder {}: {:?}", reminder.id, e);
        }
    });

    Ok(())
}

fn mute_reminder(user_id: UserId, remaining_secs: u64) -> String {
    format!(
        "{} 🚫 You are muted for another {} due to rule violation. Please wait patiently.",
        mention_user(user_id),
        bold(&format!("{} seconds", remaining_secs)),
    )
}

fn penalty_warning(user_id: UserId, exempt: bool, duration: &str) -> String {
    let consequence = if exempt {
        format!(
            "⚠️ You're an admin, so I can't mute you, but anyone else would be muted for {}.",
            bold(duration)
        )
    } else {
        format!("⏳ You are muted for {}.", bold(duration))
    };

    format!(
        "# 🚫 {} STOP THAT!\nYou mentioned someone without giving a reason.\n{}",
        mention_user(user_id),
        consequence
    )
}

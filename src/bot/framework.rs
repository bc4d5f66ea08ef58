use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId};
use tracing::{debug, error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::handlers::event_handler::event_handler;
use crate::services::moderation::expiry_scheduler;

pub async fn run(settings: Settings) -> Result<(), Error> {
    let data = Arc::new(Data::new(settings.clone()));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::say::say(),
                commands::embed::embed(),
                commands::unmute::unmute(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(settings.command_prefix.clone()),
                ..Default::default()
            },
            command_check: Some(|ctx| Box::pin(commands::gate_check(ctx))),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("Error: {}", error)).await;
                        }
                        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
                            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
                        }
                        poise::FrameworkError::CommandCheckFailed { ctx, .. } => {
                            // The message gate already answered (deleted or warned)
                            debug!("Command check failed for {}", ctx.author().id);
                        }
                        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
                            let _ = ctx.say("You don't have permission to use this command.").await;
                        }
                        poise::FrameworkError::UnknownCommand { .. } => {
                            // Ordinary messages that happen to start with the prefix
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                // Sweep lapsed mutes for the rest of the process lifetime
                expiry_scheduler::spawn_expiry_scheduler(
                    data.mute_store.clone(),
                    ctx.http.clone(),
                    data.settings.unmute_check_interval,
                );
                info!(
                    "Started unmute sweep (every {:?}, mute duration {:?})",
                    data.settings.unmute_check_interval, data.settings.mute_duration
                );

                // Register commands globally or per-guild based on GUILD_ID env var
                match data.settings.guild_id {
                    Some(guild_id) => {
                        let guild_id = GuildId::new(guild_id);
                        info!(
                            "Registering {} commands in guild {}",
                            framework.options().commands.len(),
                            guild_id
                        );

                        if let Err(e) = poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            guild_id,
                        )
                        .await
                        {
                            error!("Failed to register guild commands: {:?}", e);
                            return Err(Error::Serenity(e));
                        }
                    }
                    None => {
                        info!(
                            "Registering {} commands globally",
                            framework.options().commands.len()
                        );
                        if let Err(e) =
                            poise::builtins::register_globally(ctx, &framework.options().commands)
                                .await
                        {
                            error!("Failed to register commands globally: {:?}", e);
                            return Err(Error::Serenity(e));
                        }
                        info!("Note: Global commands can take up to 1 hour to appear in all servers");
                    }
                }

                Ok(data)
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(Error::Serenity)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Serenity)
}

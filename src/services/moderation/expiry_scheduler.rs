use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serenity::all::{CreateMessage, Http, UserId};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::bot::error::Error;
use crate::constants::embeds;
use crate::services::moderation::mute_store::MuteStore;

/// Tells a user their mute is over
#[async_trait]
pub trait UnmuteNotifier: Send + Sync {
    async fn notify_unmuted(&self, user_id: UserId) -> Result<(), Error>;
}

#[async_trait]
impl UnmuteNotifier for Http {
    async fn notify_unmuted(&self, user_id: UserId) -> Result<(), Error> {
        let embed = embeds::success_embed()
            .title("You Have Been Unmuted")
            .description("Your mute has expired. You can send messages again.");

        let dm_channel = user_id.create_dm_channel(self).await?;
        dm_channel
            .send_message(self, CreateMessage::new().embed(embed))
            .await?;
        Ok(())
    }
}

/// Start the background sweep that clears lapsed mutes
pub fn spawn_expiry_scheduler<N>(
    store: Arc<MuteStore>,
    notifier: Arc<N>,
    every: Duration,
) -> JoinHandle<()>
where
    N: UnmuteNotifier + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(every);
        // A late sweep just picks up everything that lapsed meanwhile
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let released = sweep(&store, notifier.as_ref()).await;
            if released > 0 {
                info!("Unmute sweep released {} user(s)", released);
            }
        }
    })
}

/// Release every lapsed mute and DM each released user once.
/// Returns how many mutes were released.
pub async fn sweep<N>(store: &MuteStore, notifier: &N) -> usize
where
    N: UnmuteNotifier + ?Sized,
{
    let expired = store.expired_entries(store.now());
    let mut released = 0;

    for user_id in expired {
        // Someone else (lazy expiry, /unmute) may have beaten us to it
        if !store.release_if_expired(user_id) {
            continue;
        }
        released += 1;

        // DMs may be closed; the mute is already gone either way
        if let Err(e) = notifier.notify_unmuted(user_id).await {
            debug!("Could not DM user {} about unmute: {:?}", user_id, e);
        }
    }

    released
}

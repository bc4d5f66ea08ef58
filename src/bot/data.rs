use std::fmt;
use std::sync::Arc;

use crate::config::Settings;
use crate::services::moderation::message_gate::MessageGate;
use crate::services::moderation::mute_store::MuteStore;

/// Shared data available to all commands and handlers
pub struct Data {
    pub settings: Settings,
    /// Active mutes, shared with the expiry sweep
    pub mute_store: Arc<MuteStore>,
    pub gate: MessageGate,
}

impl Data {
    pub fn new(settings: Settings) -> Self {
        let mute_store = Arc::new(MuteStore::new());
        let gate = MessageGate::new(mute_store.clone(), settings.mute_duration);
        Self {
            settings,
            mute_store,
            gate,
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("muted_count", &self.mute_store.len())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;

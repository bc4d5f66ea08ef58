use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serenity::all::UserId;
use tracing::debug;

use crate::services::moderation::clock::{Clock, SystemClock};

/// A user is muted exactly while a record for them exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuteRecord {
    pub user_id: UserId,
    pub unmute_at: DateTime<Utc>,
}

impl MuteRecord {
    /// Whole seconds until `unmute_at`, never negative
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        (self.unmute_at - now).num_seconds().max(0) as u64
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.unmute_at <= now
    }

    /// Less than a whole second left, so it can no longer be reported as a wait
    pub fn is_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.remaining_seconds(now) == 0
    }
}

/// In-memory mute table shared by the message gate and the expiry sweep.
///
/// Every operation is one shard-locked map call and never awaits, so a slow
/// Discord request can't hold a lock. Restarting the bot forgets all mutes.
pub struct MuteStore {
    records: DashMap<UserId, MuteRecord>,
    clock: Arc<dyn Clock>,
}

impl MuteStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: DashMap::new(),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn is_muted(&self, user_id: UserId) -> bool {
        self.records.contains_key(&user_id)
    }

    pub fn get(&self, user_id: UserId) -> Option<MuteRecord> {
        self.records.get(&user_id).map(|r| *r)
    }

    /// Seconds until the user's mute lapses; 0 when not muted or already lapsed
    pub fn remaining_seconds(&self, user_id: UserId) -> u64 {
        let now = self.clock.now();
        self.get(user_id)
            .map(|r| r.remaining_seconds(now))
            .unwrap_or(0)
    }

    /// Mute `user_id` for `duration` unless a mute already exists.
    /// An existing mute keeps its original `unmute_at`.
    /// Returns true if a new record was created.
    pub fn impose(&self, user_id: UserId, duration: Duration) -> bool {
        let now = self.clock.now();
        let mut created = false;

        self.records.entry(user_id).or_insert_with(|| {
            created = true;
            MuteRecord {
                user_id,
                unmute_at: unmute_at(now, duration),
            }
        });

        if created {
            debug!("Muted user {} for {:?}", user_id, duration);
        }
        created
    }

    /// Drop the user's mute. Returns true if one existed.
    pub fn release(&self, user_id: UserId) -> bool {
        let removed = self.records.remove(&user_id).is_some();
        if removed {
            debug!("Released mute for user {}", user_id);
        }
        removed
    }

    /// Drop the user's mute only if it has lapsed at the time of the call.
    /// A mute re-imposed after a caller's snapshot survives.
    pub fn release_if_expired(&self, user_id: UserId) -> bool {
        let now = self.clock.now();
        let removed = self
            .records
            .remove_if(&user_id, |_, record| record.is_expired(now))
            .is_some();
        if removed {
            debug!("Released expired mute for user {}", user_id);
        }
        removed
    }

    /// Drop the user's mute if under a second is left on it
    pub fn release_lapsed(&self, user_id: UserId) -> bool {
        let now = self.clock.now();
        self.records
            .remove_if(&user_id, |_, record| record.is_lapsed(now))
            .is_some()
    }

    /// Users whose mute has lapsed at `now`. Nothing is removed.
    pub fn expired_entries(&self, now: DateTime<Utc>) -> Vec<UserId> {
        self.records
            .iter()
            .filter(|entry| entry.value().is_expired(now))
            .map(|entry| *entry.key())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `now + duration`, pinned to the latest representable instant on overflow
fn unmute_at(now: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(duration)
        .ok()
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl Default for MuteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MuteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MuteStore")
            .field("muted_count", &self.records.len())
            .finish_non_exhaustive()
    }
}

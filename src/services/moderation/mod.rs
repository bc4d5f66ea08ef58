pub mod clock;
pub mod expiry_scheduler;
pub mod message_gate;
pub mod mute_store;

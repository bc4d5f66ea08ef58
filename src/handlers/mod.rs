pub mod event_handler;
pub mod member_log;
pub mod message;
pub mod voice_log;

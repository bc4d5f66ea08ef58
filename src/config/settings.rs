use std::env;
use std::time::Duration;

use crate::constants::timeouts::{
    DEFAULT_MUTE_DURATION_SECONDS, DEFAULT_UNMUTE_CHECK_INTERVAL_SECONDS, MAX_CONFIG_SECONDS,
};

const DEFAULT_COMMAND_PREFIX: &str = "!";

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub guild_id: Option<u64>,
    pub command_prefix: String,
    /// How long a no-reason mention mutes the sender
    pub mute_duration: Duration,
    /// Period of the background unmute sweep
    pub unmute_check_interval: Duration,
    /// Channel receiving voice join/leave/move lines
    pub voice_log_channel_id: Option<u64>,
    /// Channel receiving "left the server" lines
    pub leave_log_channel_id: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let guild_id = parse_snowflake(env::var("GUILD_ID").ok());

        let command_prefix = env::var("COMMAND_PREFIX")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());

        let mute_duration = parse_seconds(
            "MUTE_DURATION_SECONDS",
            env::var("MUTE_DURATION_SECONDS").ok(),
            DEFAULT_MUTE_DURATION_SECONDS,
        )?;

        let unmute_check_interval = parse_seconds(
            "UNMUTE_CHECK_INTERVAL_SECONDS",
            env::var("UNMUTE_CHECK_INTERVAL_SECONDS").ok(),
            DEFAULT_UNMUTE_CHECK_INTERVAL_SECONDS,
        )?;

        let voice_log_channel_id = parse_snowflake(env::var("VOICE_LOG_CHANNEL_ID").ok());
        let leave_log_channel_id = parse_snowflake(env::var("LEAVE_LOG_CHANNEL_ID").ok());

        Ok(Self {
            discord_token,
            guild_id,
            command_prefix,
            mute_duration,
            unmute_check_interval,
            voice_log_channel_id,
            leave_log_channel_id,
        })
    }
}

/// Snowflakes are never zero, so "0" counts as unset
fn parse_snowflake(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|id| *id != 0)
}

fn parse_seconds(name: &str, raw: Option<String>, default: u64) -> Result<Duration, String> {
    let secs = match raw.filter(|s| !s.trim().is_empty()) {
        Some(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("{} must be a whole number of seconds, got {:?}", name, s))?,
        None => default,
    };

    if secs == 0 {
        return Err(format!("{} must be greater than zero", name));
    }
    if secs > MAX_CONFIG_SECONDS {
        return Err(format!(
            "{} must be at most {} seconds, got {}",
            name, MAX_CONFIG_SECONDS, secs
        ));
    }

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds_default() {
        assert_eq!(parse_seconds("X", None, 60).unwrap(), Duration::from_secs(60));
        assert_eq!(
            parse_seconds("X", Some("  ".into()), 5).unwrap(),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_parse_seconds_override() {
        assert_eq!(
            parse_seconds("X", Some("120".into()), 60).unwrap(),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn test_parse_seconds_rejects_bad_values() {
        assert!(parse_seconds("X", Some("0".into()), 60).is_err());
        assert!(parse_seconds("X", Some("-3".into()), 60).is_err());
        assert!(parse_seconds("X", Some("soon".into()), 60).is_err());
    }

    #[test]
    fn test_parse_seconds_upper_bound() {
        assert_eq!(
            parse_seconds("X", Some(MAX_CONFIG_SECONDS.to_string()), 60).unwrap(),
            Duration::from_secs(MAX_CONFIG_SECONDS)
        );
        assert!(parse_seconds("X", Some((MAX_CONFIG_SECONDS + 1).to_string()), 60).is_err());
        assert!(parse_seconds("X", Some("1000000000000000".into()), 60).is_err());
    }

    #[test]
    fn test_parse_snowflake() {
        assert_eq!(parse_snowflake(Some("1381914817656393891".into())), Some(1381914817656393891));
        assert_eq!(parse_snowflake(Some("0".into())), None);
        assert_eq!(parse_snowflake(Some("abc".into())), None);
        assert_eq!(parse_snowflake(None), None);
    }
}

use std::time::Duration;

/// How long a no-reason mention mutes the sender (defaults, can be overridden via env vars)
pub const DEFAULT_MUTE_DURATION_SECONDS: u64 = 60;
/// How often the expiry sweep runs
pub const DEFAULT_UNMUTE_CHECK_INTERVAL_SECONDS: u64 = 5;

/// Lifetime of the "you are muted" reminder before the bot deletes it
pub const MUTE_WARNING_DELETE_AFTER: Duration = Duration::from_secs(8);

/// Text left after stripping mentions must be longer than this to count as a reason
pub const MENTION_REASON_MIN_CHARS: usize = 6;

/// Longest mute (and sweep interval) accepted from configuration: 28 days
pub const MAX_CONFIG_SECONDS: u64 = 28 * 24 * 60 * 60;

/// Format duration for display, e.g. "1 hour 2 minutes 5 seconds"
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    if total_secs == 0 {
        return "0 seconds".to_string();
    }

    let parts = [
        (total_secs / 86400, "day"),
        (total_secs % 86400 / 3600, "hour"),
        (total_secs % 3600 / 60, "minute"),
        (total_secs % 60, "second"),
    ];

    parts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{} {}{}", n, unit, if *n == 1 { "" } else { "s" }))
        .collect::<Vec<_>>()
        .join(" ")
}

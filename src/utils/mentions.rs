use once_cell::sync::Lazy;
use regex::Regex;

/// `<@123>` and the legacy nickname form `<@!123>`
static USER_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<@!?[0-9]+>").expect("user mention pattern is valid")
});

/// Remove user mention tokens and trim what's left
pub fn strip_user_mentions(content: &str) -> String {
    USER_MENTION.replace_all(content, "").trim().to_string()
}

/// Number of characters left once mentions are gone
pub fn reason_length(content: &str) -> usize {
    strip_user_mentions(content).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_mentions() {
        assert_eq!(strip_user_mentions("hey <@123>"), "hey");
        assert_eq!(strip_user_mentions("<@!42>   ok  "), "ok");
        assert_eq!(strip_user_mentions("<@1><@2> <@!3>"), "");
        assert_eq!(
            strip_user_mentions("hey <@123>, can you help me with the deploy?"),
            "hey , can you help me with the deploy?"
        );
    }

    #[test]
    fn test_role_and_channel_mentions_are_kept() {
        assert_eq!(strip_user_mentions("<@&99> <#100>"), "<@&99> <#100>");
    }

    #[test]
    fn test_reason_length() {
        assert_eq!(reason_length("hey <@123>"), 3);
        assert_eq!(reason_length("ok <@999>"), 2);
        assert_eq!(reason_length("<@5> 123456"), 6);
        assert_eq!(reason_length("<@5> 1234567"), 7);
    }
}

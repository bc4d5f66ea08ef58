use serenity::all::{Context, GuildId, Permissions, UserId};
use tracing::debug;

/// Check if a member has administrator permissions
pub async fn is_admin(ctx: &Context, guild_id: GuildId, user_id: UserId) -> bool {
    let lookup = match guild_id.member(ctx, user_id).await {
        Ok(member) => member.permissions(ctx),
        Err(e) => Err(e),
    };
    resolve_admin(lookup, user_id)
}

/// A failed lookup counts as "not an admin", but leaves a trace
fn resolve_admin(lookup: serenity::Result<Permissions>, user_id: UserId) -> bool {
    match lookup {
        Ok(permissions) => permissions.administrator(),
        Err(e) => {
            debug!(
                "Could not resolve permissions for user {}, treating as non-admin: {:?}",
                user_id, e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_admin() {
        let user = UserId::new(9);
        assert!(resolve_admin(Ok(Permissions::ADMINISTRATOR), user));
        assert!(!resolve_admin(Ok(Permissions::MANAGE_MESSAGES), user));
        assert!(!resolve_admin(Ok(Permissions::empty()), user));
    }

    #[test]
    fn test_failed_lookup_is_not_admin() {
        let lookup = Err(serenity::Error::Other("member not found"));
        assert!(!resolve_admin(lookup, UserId::new(9)));
    }
}

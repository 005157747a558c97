use poise::serenity_prelude::{self as serenity, EditMember, Member};
use tracing::info;

use crate::{
    models::{Data, Error},
    nickname::NameFix,
};

/// The name a member is currently shown with in the guild: nickname, then global name, then username
pub fn current_name(member: &Member) -> String {
    member.display_name().to_string()
}

/// Fix a member's nickname, renaming them only when the fixed name differs
pub async fn fix_member_nickname(
    ctx: &serenity::Context,
    data: &Data,
    member: &Member,
) -> Result<NameFix, Error> {
    let guild_id = member.guild_id;
    let user_id = member.user.id;

    let fix = data.name_fixer.fix_name(&current_name(member)).await?;

    if !fix.changed() {
        info!(
            "Not updating the nickname '{}' (G{}/U{})",
            fix.fixed, guild_id, user_id
        );
        return Ok(fix);
    }

    info!(
        "Updating nickname '{}' to '{}' (G{}/U{})",
        fix.original, fix.fixed, guild_id, user_id
    );
    guild_id
        .edit_member(ctx, user_id, EditMember::new().nickname(&fix.fixed))
        .await?;

    Ok(fix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member(nick: Option<&str>, global_name: Option<&str>) -> Member {
        serde_json::from_value(json!({
            "user": {
                "id": "100",
                "username": "alice_99",
                "discriminator": "0",
                "global_name": global_name,
                "avatar": null,
                "bot": false
            },
            "nick": nick,
            "avatar": null,
            "roles": [],
            "joined_at": "2023-01-01T00:00:00Z",
            "premium_since": null,
            "deaf": false,
            "mute": false,
            "flags": 0,
            "pending": false,
            "permissions": null,
            "communication_disabled_until": null,
            "guild_id": "1"
        }))
        .unwrap()
    }

    #[test]
    fn test_current_name_uses_global_name() {
        let member = member(None, Some("𝓐𝓵𝓲𝓬𝓮\u{336}"));
        assert_eq!(current_name(&member), "𝓐𝓵𝓲𝓬𝓮\u{336}");
        assert_eq!(current_name(&member), member.display_name());
    }

    #[test]
    fn test_current_name_prefers_nickname() {
        let member = member(Some("Ali"), Some("𝓐𝓵𝓲𝓬𝓮"));
        assert_eq!(current_name(&member), "Ali");
    }

    #[test]
    fn test_current_name_falls_back_to_username() {
        let member = member(None, None);
        assert_eq!(current_name(&member), "alice_99");
    }
}

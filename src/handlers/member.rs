use ::serenity::model::guild::audit_log::{Action, MemberAction};
use poise::serenity_prelude::{self as serenity, GuildId, Member};
use tracing::{error, info, warn};

use crate::{
    models::Data,
    utils::permissions::{NameSubject, SkipReason, member_update_skip_reason, renamed_by_moderator},
};

use super::nickname::fix_member_nickname;

/// Handle a member joining a guild
pub async fn handle_member_join(ctx: &serenity::Context, member: &Member, data: &Data) {
    let guild_id = member.guild_id;
    if !data.auto_fix_enabled(guild_id) {
        return;
    }

    info!(
        "Pinging nickname update for member join (G{}/U{})",
        guild_id, member.user.id
    );
    if let Err(e) = fix_member_nickname(ctx, data, member).await {
        error!(
            "Failed to fix nickname on join (G{}/U{}): {}",
            guild_id, member.user.id, e
        );
    }
}

/// Handle a member's profile changing
pub async fn handle_member_update(
    ctx: &serenity::Context,
    old: Option<&Member>,
    new: &Member,
    data: &Data,
) {
    let guild_id = new.guild_id;
    let user_id = new.user.id;

    let subject = NameSubject {
        id: user_id.get(),
        display_name: new.display_name().to_string(),
        can_manage_nicknames: can_manage_nicknames(ctx, new),
    };
    let old_display_name = old.map(|m| m.display_name());

    match member_update_skip_reason(data.auto_fix_enabled(guild_id), old_display_name, &subject) {
        Some(SkipReason::Disabled) | Some(SkipReason::NameUnchanged) => return,
        Some(reason) => {
            info!(
                "Not pinging nickname update, {} (G{}/U{})",
                reason, guild_id, user_id
            );
            return;
        }
        None => {}
    }

    if renamed_by_moderator(&subject, latest_member_update(ctx, guild_id).await) {
        info!(
            "Not pinging nickname update, {} (G{}/U{})",
            SkipReason::RenamedByModerator,
            guild_id,
            user_id
        );
        return;
    }

    info!(
        "Pinging nickname update for member update (G{}/U{})",
        guild_id, user_id
    );
    if let Err(e) = fix_member_nickname(ctx, data, new).await {
        error!(
            "Failed to fix nickname on update (G{}/U{}): {}",
            guild_id, user_id, e
        );
    }
}

/// Check the member's guild-wide MANAGE_NICKNAMES permission from the cache
fn can_manage_nicknames(ctx: &serenity::Context, member: &Member) -> bool {
    ctx.cache
        .guild(member.guild_id)
        .is_some_and(|guild| guild.member_permissions(member).manage_nicknames())
}

/// Get `(target, actor)` of the most recent member-update audit log entry
///
/// Missing audit log access is treated as no entry.
async fn latest_member_update(ctx: &serenity::Context, guild_id: GuildId) -> Option<(u64, u64)> {
    let logs = match guild_id
        .audit_logs(
            &ctx.http,
            Some(Action::Member(MemberAction::Update)),
            None,
            None,
            Some(1),
        )
        .await
    {
        Ok(logs) => logs,
        Err(e) => {
            warn!("Failed to read audit log (G{}): {}", guild_id, e);
            return None;
        }
    };

    logs.entries.first().and_then(|entry| {
        entry
            .target_id
            .map(|target_id| (target_id.get(), entry.user_id.get()))
    })
}

use poise::serenity_prelude as serenity;
use tracing::{info, warn};

use crate::{
    handlers::{current_name, fix_member_nickname},
    models::{Context, Error},
    utils::messages::{build_name_change, build_name_unchanged, format_error, format_success},
};

/// Fixes a user's nickname to remove zalgo and decorative characters
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("fun"),
    required_permissions = "MANAGE_NICKNAMES",
    required_bot_permissions = "MANAGE_NICKNAMES"
)]
pub async fn fixunzalgoname(
    ctx: Context<'_>,
    #[description = "The member whose nickname should be fixed"] user: serenity::Member,
) -> Result<(), Error> {
    fix_and_report(ctx, &user).await
}

/// Adds fixable letters to the replacement list
#[poise::command(prefix_command, slash_command, owners_only)]
pub async fn addfixableletters(
    ctx: Context<'_>,
    #[description = "Characters to replace"] phrase1: String,
    #[description = "What each character should become"] phrase2: String,
) -> Result<(), Error> {
    add_letters(ctx, &phrase1, &phrase2).await?;
    Ok(())
}

/// Adds a given user's name to the fixable letters, then fixes their nickname
#[poise::command(prefix_command, slash_command, guild_only, owners_only)]
pub async fn addfixablename(
    ctx: Context<'_>,
    #[description = "The member whose name should be learned"] user: serenity::Member,
    #[description = "How their name should read"]
    #[rest]
    fixed_name: String,
) -> Result<(), Error> {
    if !add_letters(ctx, user.display_name(), &fixed_name).await? {
        return Ok(());
    }

    fix_and_report(ctx, &user).await
}

/// Fix a member's nickname and tell the invoker what happened
async fn fix_and_report(ctx: Context<'_>, user: &serenity::Member) -> Result<(), Error> {
    let old_name = current_name(user);
    let fix = fix_member_nickname(ctx.serenity_context(), ctx.data(), user).await?;

    let reply = if fix.changed() {
        build_name_change(&old_name, &fix.fixed)
    } else {
        build_name_unchanged(&old_name)
    };
    ctx.say(reply).await?;
    Ok(())
}

/// Merge two phrases into the replacement table and report the outcome
///
/// Returns whether the table was written.
async fn add_letters(ctx: Context<'_>, old_phrase: &str, new_phrase: &str) -> Result<bool, Error> {
    match ctx
        .data()
        .name_fixer
        .add_replacements(old_phrase, new_phrase)
        .await
    {
        Ok(table) => {
            info!(
                "Added letter replacements '{}' -> '{}' ({} entries)",
                old_phrase,
                new_phrase,
                table.len()
            );
            ctx.say(format_success("Written to file successfully.")).await?;
            Ok(true)
        }
        Err(e) => {
            warn!("Failed to add letter replacements: {}", e);
            ctx.say(format_error(&e.to_string())).await?;
            Ok(false)
        }
    }
}

use tracing::{error, info};

use crate::{
    models::{Context, Error, GuildSettings},
    utils::messages::{build_auto_fix_toggled, build_database_error},
    utils::validation::require_guild,
};

/// Enable or disable automatic nickname fixing for this server
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn autonickname(
    ctx: Context<'_>,
    #[description = "Whether nicknames should be fixed on join and rename"] enabled: bool,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;

    if let Err(e) = ctx
        .data()
        .db
        .set_automatic_nickname_update(guild_id, enabled)
        .await
    {
        error!("Failed to save nickname setting to database: {}", e);
        ctx.say(build_database_error()).await?;
        return Ok(());
    }

    ctx.data()
        .guild_settings
        .entry(guild_id)
        .or_insert_with(GuildSettings::default)
        .automatic_nickname_update = enabled;

    ctx.say(build_auto_fix_toggled(enabled)).await?;

    info!(
        "Set automatic nickname update to {} in guild {}",
        enabled, guild_id
    );

    Ok(())
}

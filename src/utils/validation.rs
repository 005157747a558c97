use poise::serenity_prelude::GuildId;

/// Validation error types
#[derive(Debug)]
pub enum ValidationError {
    NotInGuild,
    MissingCachedGuild(GuildId),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NotInGuild => write!(f, "This command must be used in a server"),
            ValidationError::MissingCachedGuild(guild_id) => {
                write!(f, "Guild {} is not available in the cache", guild_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Extract guild ID from context, returning error if not in a guild
pub fn require_guild(guild_id: Option<GuildId>) -> Result<GuildId, ValidationError> {
    guild_id.ok_or(ValidationError::NotInGuild)
}

/// Clamp the number of messages requested for a chat log to 1..=250
pub fn clamp_log_amount(amount: i64) -> u16 {
    amount.clamp(1, 250) as u16
}

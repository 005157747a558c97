use dashmap::DashMap;
use poise::serenity_prelude::GuildId;

use crate::{database::Database, nickname::NameFixer};

/// Per-guild settings cached from the database
#[derive(Clone, Debug, Default)]
pub struct GuildSettings {
    pub automatic_nickname_update: bool,
}

/// Bot state shared across all handlers
pub struct Data {
    /// Database connection
    pub db: Database,
    /// Maps guild IDs to their settings
    pub guild_settings: DashMap<GuildId, GuildSettings>,
    /// Nickname normalization engine
    pub name_fixer: NameFixer,
    /// Client used for calls to remote services
    pub http_client: reqwest::Client,
    /// Endpoint that renders chat logs
    pub chatlog_api_url: String,
}

impl Data {
    /// Create a new Data instance
    pub fn new(
        db: Database,
        name_fixer: NameFixer,
        http_client: reqwest::Client,
        chatlog_api_url: String,
    ) -> Self {
        Self {
            db,
            guild_settings: DashMap::new(),
            name_fixer,
            http_client,
            chatlog_api_url,
        }
    }

    /// Load existing guild settings from the database into memory
    pub async fn load_from_database(&self) -> Result<(), Error> {
        let settings = self.db.get_all_guild_settings().await?;
        for (guild_id, automatic_nickname_update) in settings {
            self.guild_settings.insert(
                guild_id,
                GuildSettings {
                    automatic_nickname_update,
                },
            );
        }
        tracing::info!(
            "Loaded settings for {} guilds from database",
            self.guild_settings.len()
        );
        Ok(())
    }

    /// Check if nicknames should be fixed automatically in a guild
    pub fn auto_fix_enabled(&self, guild_id: GuildId) -> bool {
        self.guild_settings
            .get(&guild_id)
            .is_some_and(|settings| settings.automatic_nickname_update)
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

use super::Database;
use poise::serenity_prelude::GuildId;
use sqlx::Error as SqlxError;

impl Database {
    /// Enable or disable automatic nickname fixing for a guild
    pub async fn set_automatic_nickname_update(
        &self,
        guild_id: GuildId,
        enabled: bool,
    ) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            INSERT INTO guild_settings (guild_id, automatic_nickname_update, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (guild_id)
            DO UPDATE SET automatic_nickname_update = $2, updated_at = NOW()
            "#,
        )
        .bind(guild_id.get() as i64)
        .bind(enabled)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Get the automatic nickname flag of every guild that has settings
    pub async fn get_all_guild_settings(&self) -> Result<Vec<(GuildId, bool)>, SqlxError> {
        let rows: Vec<(i64, bool)> = sqlx::query_as(
            "SELECT guild_id, automatic_nickname_update FROM guild_settings",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(guild_id, enabled)| (GuildId::new(guild_id as u64), enabled))
            .collect())
    }
}

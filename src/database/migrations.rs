use super::Database;
use sqlx::Error as SqlxError;

impl Database {
    /// Run database migrations to create tables
    pub(super) async fn run_migrations(&self) -> Result<(), SqlxError> {
        self.create_guild_settings_table().await?;
        Ok(())
    }

    async fn create_guild_settings_table(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS guild_settings (
                guild_id BIGINT PRIMARY KEY,
                automatic_nickname_update BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMP NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        // Add the column if it doesn't exist (for existing databases)
        sqlx::query(
            r#"
            DO $$
            BEGIN
                IF NOT EXISTS (SELECT 1 FROM information_schema.columns
                              WHERE table_name = 'guild_settings' AND column_name = 'automatic_nickname_update') THEN
                    ALTER TABLE guild_settings ADD COLUMN automatic_nickname_update BOOLEAN NOT NULL DEFAULT FALSE;
                END IF;
            END $$;
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

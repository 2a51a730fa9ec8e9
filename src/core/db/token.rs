use std::future::Future;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::BinDb;

/// Registry of push-notification recipient tokens, keyed by role.
pub trait NotifyTokenRepository {
    fn save_token(&self, role: &str, token: &str) -> impl Future<Output = anyhow::Result<()>>;
    fn get_token(&self, role: &str) -> impl Future<Output = anyhow::Result<Option<String>>>;
}

impl NotifyTokenRepository for BinDb {
    async fn save_token(&self, role: &str, token: &str) -> anyhow::Result<()> {
        let updated_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
        sqlx::query(
            "INSERT INTO notify_tokens (role, token, updated_at) VALUES (?, ?, ?)
             ON CONFLICT (role) DO UPDATE SET token = EXCLUDED.token,
                                             updated_at = EXCLUDED.updated_at",
        )
        .bind(role)
        .bind(token)
        .bind(&updated_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn get_token(&self, role: &str) -> anyhow::Result<Option<String>> {
        let token = sqlx::query_scalar::<_, String>(
            "SELECT token FROM notify_tokens WHERE role = ?",
        )
        .bind(role)
        .fetch_optional(self.pool())
        .await?;
        Ok(token)
    }
}

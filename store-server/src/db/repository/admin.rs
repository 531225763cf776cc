//! Admin User Repository

use sqlx::SqlitePool;

use super::{BaseRepository, RepoResult};
use shared::models::AdminUser;

#[derive(Clone)]
pub struct AdminRepository {
    base: BaseRepository,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>> {
        let admin: Option<AdminUser> =
            sqlx::query_as("SELECT * FROM admins WHERE username = ?1 LIMIT 1")
                .bind(username)
                .fetch_optional(self.base.pool())
                .await?;
        Ok(admin)
    }

    pub async fn insert(&self, admin: &AdminUser) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO admins (id, username, password_hash, display_name, is_active, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&admin.id)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(&admin.display_name)
        .bind(admin.is_active)
        .bind(admin.created_at)
        .execute(self.base.pool())
        .await?;
        Ok(())
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admins")
            .fetch_one(self.base.pool())
            .await?;
        Ok(count)
    }
}

//! Promotion Repository

use sqlx::SqlitePool;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Promotion, PromotionCreate, PromotionUpdate};
use shared::util::new_id;

#[derive(Clone)]
pub struct PromotionRepository {
    base: BaseRepository,
}

impl PromotionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    pub async fn create(&self, data: PromotionCreate) -> RepoResult<Promotion> {
        if !(0.0..=100.0).contains(&data.percent) {
            return Err(RepoError::Validation(format!(
                "percent must be within 0..=100, got {}",
                data.percent
            )));
        }
        if data.ends_at < data.starts_at {
            return Err(RepoError::Validation(
                "ends_at must not precede starts_at".into(),
            ));
        }

        let promotion = Promotion {
            id: new_id(),
            name: data.name,
            percent: data.percent,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            is_active: true,
        };

        sqlx::query(
            "INSERT INTO promotions (id, name, percent, starts_at, ends_at, is_active) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&promotion.id)
        .bind(&promotion.name)
        .bind(promotion.percent)
        .bind(promotion.starts_at)
        .bind(promotion.ends_at)
        .bind(promotion.is_active)
        .execute(self.base.pool())
        .await?;

        Ok(promotion)
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Promotion>> {
        let promotions: Vec<Promotion> =
            sqlx::query_as("SELECT * FROM promotions ORDER BY starts_at DESC")
                .fetch_all(self.base.pool())
                .await?;
        Ok(promotions)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Promotion>> {
        let promotion: Option<Promotion> =
            sqlx::query_as("SELECT * FROM promotions WHERE id = ?1")
                .bind(id)
                .fetch_optional(self.base.pool())
                .await?;
        Ok(promotion)
    }

    /// Promotions whose window contains the given instant
    pub async fn find_current(&self, now_millis: i64) -> RepoResult<Vec<Promotion>> {
        let promotions: Vec<Promotion> = sqlx::query_as(
            "SELECT * FROM promotions \
             WHERE is_active = 1 AND starts_at <= ?1 AND ?1 <= ends_at \
             ORDER BY percent DESC",
        )
        .bind(now_millis)
        .fetch_all(self.base.pool())
        .await?;
        Ok(promotions)
    }

    pub async fn update(&self, id: &str, data: PromotionUpdate) -> RepoResult<Promotion> {
        if let Some(p) = data.percent
            && !(0.0..=100.0).contains(&p)
        {
            return Err(RepoError::Validation(format!(
                "percent must be within 0..=100, got {}",
                p
            )));
        }

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = ?");
        }
        if data.percent.is_some() {
            set_parts.push("percent = ?");
        }
        if data.starts_at.is_some() {
            set_parts.push("starts_at = ?");
        }
        if data.ends_at.is_some() {
            set_parts.push("ends_at = ?");
        }
        if data.is_active.is_some() {
            set_parts.push("is_active = ?");
        }

        if !set_parts.is_empty() {
            let query_str = format!(
                "UPDATE promotions SET {} WHERE id = ?",
                set_parts.join(", ")
            );
            let mut query = sqlx::query(&query_str);
            if let Some(v) = data.name {
                query = query.bind(v);
            }
            if let Some(v) = data.percent {
                query = query.bind(v);
            }
            if let Some(v) = data.starts_at {
                query = query.bind(v);
            }
            if let Some(v) = data.ends_at {
                query = query.bind(v);
            }
            if let Some(v) = data.is_active {
                query = query.bind(v);
            }
            let result = query.bind(id).execute(self.base.pool()).await?;
            if result.rows_affected() == 0 {
                return Err(RepoError::NotFound(format!("Promotion {} not found", id)));
            }
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Promotion {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM promotions WHERE id = ?1")
            .bind(id)
            .execute(self.base.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Promotion {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn find_current_filters_window_and_active_flag() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PromotionRepository::new(db.pool.clone());

        let live = repo
            .create(PromotionCreate {
                name: "summer".into(),
                percent: 20.0,
                starts_at: 100,
                ends_at: 200,
            })
            .await
            .unwrap();
        let expired = repo
            .create(PromotionCreate {
                name: "spring".into(),
                percent: 10.0,
                starts_at: 0,
                ends_at: 50,
            })
            .await
            .unwrap();
        let disabled = repo
            .create(PromotionCreate {
                name: "secret".into(),
                percent: 50.0,
                starts_at: 0,
                ends_at: 1_000,
            })
            .await
            .unwrap();
        repo.update(
            &disabled.id,
            PromotionUpdate {
                name: None,
                percent: None,
                starts_at: None,
                ends_at: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();

        let current = repo.find_current(150).await.unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].id, live.id);
        assert_ne!(current[0].id, expired.id);
    }

    #[tokio::test]
    async fn out_of_range_percent_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PromotionRepository::new(db.pool.clone());
        let err = repo
            .create(PromotionCreate {
                name: "bogus".into(),
                percent: 120.0,
                starts_at: 0,
                ends_at: 10,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}

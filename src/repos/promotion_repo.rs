/*
 * Responsibility
 * - promotions の永続化契約 (PromotionStore) と Postgres 実装
 * - 物理削除はしない: invalidate は enabled = false にするだけ
 * - owner は INSERT 時のみ設定し、UPDATE では変更しない
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;

/// Two-state lifecycle. `Invalidated` is terminal from the API's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionStatus {
    Enabled,
    Invalidated,
}

impl PromotionStatus {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for PromotionStatus {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Invalidated
        }
    }
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PromotionRow {
    #[sqlx(rename = "promotionId")]
    pub promotion_id: i64,

    pub title: String,
    pub description: String,

    #[sqlx(rename = "redirectLink")]
    pub redirect_link: String,

    #[sqlx(rename = "imageId")]
    pub image_id: String,

    pub owner: Uuid,

    #[sqlx(rename = "enabled", try_from = "bool")]
    pub status: PromotionStatus,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Full write of a promotion. `promotion_id: None` inserts a new row.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionWrite {
    pub promotion_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub redirect_link: String,
    pub image_id: String,
    pub status: PromotionStatus,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromotionStore: Send + Sync {
    /// Enabled promotions in insertion order.
    async fn list_enabled(&self) -> RepoResult<Vec<PromotionRow>>;

    /// Any promotion, invalidated or not.
    async fn get(&self, promotion_id: i64) -> RepoResult<Option<PromotionRow>>;

    /// Inserts, or updates the row with the same id and owner.
    /// Returns `None` when an update matched nothing.
    async fn upsert_by_owner(
        &self,
        owner: Uuid,
        write: PromotionWrite,
    ) -> RepoResult<Option<PromotionRow>>;

    /// Returns `false` when no row has that id.
    async fn invalidate(&self, promotion_id: i64) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgPromotionRepo {
    pool: PgPool,
}

impl PgPromotionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromotionStore for PgPromotionRepo {
    async fn list_enabled(&self) -> RepoResult<Vec<PromotionRow>> {
        let rows = sqlx::query_as::<_, PromotionRow>(
            r#"
            SELECT
                "promotionId", title, description, "redirectLink", "imageId",
                owner, enabled, "createdAt", "updatedAt"
            FROM promotions
            WHERE enabled = true
            ORDER BY "promotionId"
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, promotion_id: i64) -> RepoResult<Option<PromotionRow>> {
        let row = sqlx::query_as::<_, PromotionRow>(
            r#"
            SELECT
                "promotionId", title, description, "redirectLink", "imageId",
                owner, enabled, "createdAt", "updatedAt"
            FROM promotions
            WHERE "promotionId" = $1
            "#,
        )
        .bind(promotion_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn upsert_by_owner(
        &self,
        owner: Uuid,
        write: PromotionWrite,
    ) -> RepoResult<Option<PromotionRow>> {
        let enabled = write.status.is_enabled();

        let Some(promotion_id) = write.promotion_id else {
            let row = sqlx::query_as::<_, PromotionRow>(
                r#"
                INSERT INTO promotions
                    (title, description, "redirectLink", "imageId", owner, enabled)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING
                    "promotionId", title, description, "redirectLink", "imageId",
                    owner, enabled, "createdAt", "updatedAt"
                "#,
            )
            .bind(&write.title)
            .bind(&write.description)
            .bind(&write.redirect_link)
            .bind(&write.image_id)
            .bind(owner)
            .bind(enabled)
            .fetch_one(&self.pool)
            .await?;

            return Ok(Some(row));
        };

        // enabled は AND で合成: 無効化済みの行は UPDATE で復活しない
        let row = sqlx::query_as::<_, PromotionRow>(
            r#"
            UPDATE promotions
            SET
                title = $3,
                description = $4,
                "redirectLink" = $5,
                "imageId" = $6,
                enabled = enabled AND $7,
                "updatedAt" = now()
            WHERE "promotionId" = $1 AND owner = $2
            RETURNING
                "promotionId", title, description, "redirectLink", "imageId",
                owner, enabled, "createdAt", "updatedAt"
            "#,
        )
        .bind(promotion_id)
        .bind(owner)
        .bind(&write.title)
        .bind(&write.description)
        .bind(&write.redirect_link)
        .bind(&write.image_id)
        .bind(enabled)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn invalidate(&self, promotion_id: i64) -> RepoResult<bool> {
        // already-invalidated rows still match, so a second call is a no-op success
        let result = sqlx::query(
            r#"
            UPDATE promotions
            SET enabled = false, "updatedAt" = now()
            WHERE "promotionId" = $1
            "#,
        )
        .bind(promotion_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

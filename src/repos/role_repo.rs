/*
 * Responsibility
 * - user_roles テーブルの参照
 * - 権限判定そのものは services::permission 側
 */
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;

pub async fn has_role(db: &PgPool, user_id: Uuid, role: &str) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM user_roles
            WHERE "userId" = $1 AND role = $2
        )
        "#,
    )
    .bind(user_id)
    .bind(role)
    .fetch_one(db)
    .await?;

    Ok(found)
}

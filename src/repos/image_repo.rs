/*
 * Responsibility
 * - images テーブルへの raw bytes 保存
 * - 画像の中身は解釈しない (encode/decode しない)
 */
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoResult;

pub async fn create(db: &PgPool, data: &[u8]) -> RepoResult<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO images (data)
        VALUES ($1)
        RETURNING "imageId"
        "#,
    )
    .bind(data)
    .fetch_one(db)
    .await?;

    Ok(id)
}

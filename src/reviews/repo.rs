use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Review joined with its author's display name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewListItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_name: String,
}

pub async fn insert(db: &PgPool, user_id: Uuid, content: &str) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (user_id, content)
        VALUES ($1, $2)
        RETURNING id, user_id, content, created_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .fetch_one(db)
    .await
}

pub async fn list(
    db: &PgPool,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<ReviewListItem>, sqlx::Error> {
    sqlx::query_as::<_, ReviewListItem>(
        r#"
        SELECT r.id, r.user_id, r.content, r.created_at, u.name AS user_name
        FROM reviews r
        JOIN users u ON u.id = r.user_id
        ORDER BY r.created_at DESC, r.id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

/// Returns `false` when no review had that id.
pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Status given to every new comment.
pub const PENDING: &str = "pendiente";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentListItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_name: String,
    pub user_email: String,
}

/// Attach a comment to the user owning `email`, creating that user first if
/// needed. Both statements share one transaction; the upsert on the unique
/// email closes the check-then-insert race. An existing user keeps its name.
pub async fn submit(
    db: &PgPool,
    name: &str,
    email: &str,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let mut tx = db.begin().await?;

    let user_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (name, email)
        VALUES ($1, $2)
        ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .fetch_one(&mut *tx)
    .await?;

    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (user_id, content)
        VALUES ($1, $2)
        RETURNING id, user_id, content, status, created_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(comment)
}

pub async fn list(
    db: &PgPool,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<CommentListItem>, sqlx::Error> {
    sqlx::query_as::<_, CommentListItem>(
        r#"
        SELECT c.id, c.user_id, c.content, c.status, c.created_at,
               u.name AS user_name, u.email AS user_email
        FROM comments c
        JOIN users u ON u.id = c.user_id
        ORDER BY c.created_at DESC, c.id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn update_status(
    db: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET status = $1
        WHERE id = $2
        RETURNING id, user_id, content, status, created_at
        "#,
    )
    .bind(status)
    .bind(id)
    .fetch_optional(db)
    .await
}

//! Schema bootstrap exposed over HTTP.
//!
//! Tables are created on demand by an idempotent endpoint rather than by a
//! migration run at startup. Every statement of a bootstrap runs in one
//! transaction, so a failure leaves the schema as it was.

use axum::{extract::State, routing::get, Router};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::{
    auth::RequireAdmin, dto::MessageResponse, error::AppResult, extract::Json, state::AppState,
};

/// Accounts with passwords and an admin flag, plus their reviews.
pub const REVIEWS_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name          TEXT NOT NULL,
        email         TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        is_admin      BOOLEAN NOT NULL DEFAULT FALSE,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT users_email_key UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id         UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id    UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        content    TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS reviews_created_at_idx ON reviews (created_at DESC)",
];

/// Password-less commenters keyed by email, plus their moderated comments.
pub const COMMENTS_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id         UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name       TEXT NOT NULL,
        email      TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT users_email_key UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id         UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id    UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        content    TEXT NOT NULL,
        status     TEXT NOT NULL DEFAULT 'pendiente',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS comments_created_at_idx ON comments (created_at DESC)",
];

/// Advisory lock key shared by every schema bootstrap.
const SCHEMA_LOCK_KEY: i64 = 0x6665_6564_6261_636b;

/// Runs `statements` in one transaction. Concurrent bootstraps queue on a
/// transaction-scoped advisory lock, so each sees the catalog settled.
pub async fn apply(db: &PgPool, statements: &[&str]) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for statement in statements {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await
}

pub fn reviews_routes() -> Router<AppState> {
    Router::new()
        .route("/create-tables", get(create_tables))
        .route("/drop-reviews", get(drop_reviews))
}

pub fn comments_routes() -> Router<AppState> {
    Router::new().route("/init", get(init))
}

#[instrument(skip(state))]
pub async fn create_tables(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    apply(&state.db, REVIEWS_SCHEMA).await?;
    info!("reviews schema ready");
    Ok(Json(MessageResponse::new("tables created")))
}

/// Irreversibly drops the reviews table and everything in it.
#[instrument(skip(state, admin))]
pub async fn drop_reviews(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<MessageResponse>> {
    sqlx::query("DROP TABLE IF EXISTS reviews CASCADE")
        .execute(&state.db)
        .await?;
    warn!(dropped_by = %admin.id, "reviews table dropped");
    Ok(Json(MessageResponse::new("reviews table dropped")))
}

#[instrument(skip(state))]
pub async fn init(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    apply(&state.db, COMMENTS_SCHEMA).await?;
    info!("comments schema ready");
    Ok(Json(MessageResponse::new("tables created")))
}

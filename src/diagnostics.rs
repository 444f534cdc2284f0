use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::instrument;

use crate::{error::AppResult, extract::Json, state::AppState};

#[derive(Debug, Serialize)]
pub struct DbTimeResponse {
    #[serde(with = "time::serde::rfc3339")]
    pub now: OffsetDateTime,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/test-db", get(test_db))
        .route("/health", get(|| async { "ok" }))
}

/// Round-trips to the store and reports its clock.
#[instrument(skip(state))]
pub async fn test_db(State(state): State<AppState>) -> AppResult<Json<DbTimeResponse>> {
    let now: OffsetDateTime = sqlx::query_scalar("SELECT NOW()")
        .fetch_one(&state.db)
        .await?;
    Ok(Json(DbTimeResponse { now }))
}

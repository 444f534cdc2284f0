use axum::{
    extract::State,
    routing::{get, patch},
    Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{SubmitCommentRequest, UpdateStatusRequest},
    repo::{self, Comment, CommentListItem},
};
use crate::{
    error::{AppError, AppResult},
    extract::{Json, Path, Query},
    pagination::Pagination,
    state::AppState,
    validation::{normalize_email, required},
};

pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments).post(submit_comment))
        .route("/comments/:id", patch(update_status))
}

#[instrument(skip(state, payload))]
pub async fn submit_comment(
    State(state): State<AppState>,
    Json(payload): Json<SubmitCommentRequest>,
) -> AppResult<Json<Comment>> {
    let (Some(name), Some(email), Some(content)) = (
        required(payload.name),
        required(payload.email),
        required(payload.content),
    ) else {
        return Err(AppError::Validation("missing fields".into()));
    };
    let email = normalize_email(&email);

    let comment = repo::submit(&state.db, &name, &email, &content).await?;

    info!(comment_id = %comment.id, user_id = %comment.user_id, "comment submitted");
    Ok(Json(comment))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> AppResult<Json<Vec<CommentListItem>>> {
    let (limit, offset) = p.bounds()?;
    let comments = repo::list(&state.db, limit, offset).await?;
    Ok(Json(comments))
}

#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Comment>> {
    let status =
        required(payload.status).ok_or_else(|| AppError::Validation("missing status".into()))?;

    let Some(comment) = repo::update_status(&state.db, id, &status).await? else {
        warn!(%id, "comment not found");
        return Err(AppError::NotFound("comment not found".into()));
    };

    info!(%id, status = %comment.status, "comment status updated");
    Ok(Json(comment))
}

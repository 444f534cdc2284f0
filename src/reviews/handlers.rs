use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::CreateReviewRequest,
    repo::{self, Review, ReviewListItem},
};
use crate::{
    auth::{AuthUser, RequireAdmin},
    dto::MessageResponse,
    error::{AppError, AppResult},
    extract::{Json, Path, Query},
    pagination::Pagination,
    state::AppState,
    validation::required,
};

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(list_reviews).post(create_review))
        .route("/reviews/:id", delete(delete_review))
}

#[instrument(skip(state, payload), fields(user_id = %user.id))]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let content =
        required(payload.content).ok_or_else(|| AppError::Validation("missing content".into()))?;

    let review = repo::insert(&state.db, user.id, &content).await?;

    info!(review_id = %review.id, "review created");
    Ok((StatusCode::CREATED, Json(review)))
}

#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> AppResult<Json<Vec<ReviewListItem>>> {
    let (limit, offset) = p.bounds()?;
    let reviews = repo::list(&state.db, limit, offset).await?;
    Ok(Json(reviews))
}

#[instrument(skip(state, admin))]
pub async fn delete_review(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if !repo::delete(&state.db, id).await? {
        warn!(%id, "review not found");
        return Err(AppError::NotFound("review not found".into()));
    }

    info!(%id, deleted_by = %admin.id, "review deleted");
    Ok(Json(MessageResponse::new("review deleted")))
}

use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;

pub use extractors::{AuthUser, RequireAdmin};
pub use jwt::{Claims, JwtKeys};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}

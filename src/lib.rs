pub mod app;
pub mod auth;
pub mod comments;
pub mod config;
pub mod diagnostics;
pub mod dto;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod reviews;
pub mod schema;
pub mod state;
mod validation;

pub use app::build_app;
pub use state::AppState;

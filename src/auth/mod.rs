mod dto;
mod handlers;
pub mod jwt;
mod password;
mod repo;

pub use repo::User;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}

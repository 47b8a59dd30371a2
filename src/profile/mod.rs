mod dto;
mod handlers;
pub mod repo;
pub mod services;

pub use repo::Profile;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}

pub mod dto;
mod handlers;
pub mod repo;

pub use repo::{Meal, MealType};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}

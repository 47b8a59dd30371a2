use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use time::{macros::format_description, Date};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    meals::{
        dto::{CreateMealRequest, MealItem, MealsQuery},
        repo::{Meal, MealError},
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/meals", get(list_meals))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/:id", delete(delete_meal))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<MealsQuery>,
) -> Result<Json<Vec<MealItem>>, (StatusCode, String)> {
    let meals = match q.date.as_deref() {
        Some(raw) => {
            let fmt = format_description!("[year]-[month]-[day]");
            let date = Date::parse(raw, &fmt)
                .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid date".to_string()))?;
            Meal::list_by_user_and_date(&state.db, user_id, date)
                .await
                .map_err(internal)?
        }
        None => Meal::list_by_user(&state.db, user_id, q.limit, q.offset)
            .await
            .map_err(internal)?,
    };

    Ok(Json(meals.into_iter().map(MealItem::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateMealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<MealItem>), (StatusCode, String)> {
    if let Err(e) = payload.validate() {
        warn!(error = %e, "meal rejected");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    let meal = Meal::create(&state.db, user_id, payload.into_new_meal())
        .await
        .map_err(internal)?;

    info!(user_id = %user_id, meal_id = %meal.id, "meal added");

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/meals/{}", meal.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(meal.into())))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    match Meal::delete_owned(&state.db, id, user_id).await {
        Ok(()) => {
            info!(user_id = %user_id, meal_id = %id, "meal deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(MealError::NotFound) => Err((StatusCode::NOT_FOUND, "Meal not found".into())),
        Err(MealError::Db(e)) => {
            error!(error = %e, %user_id, meal_id = %id, "delete_meal failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

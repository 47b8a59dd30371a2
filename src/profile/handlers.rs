use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    profile::{
        dto::{BmiResponse, GoalsRequest, MetricsRequest, ProfileResponse},
        repo::Profile,
        services::{compute_bmi, BmiCategory},
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/goals", put(update_goals))
        .route("/profile/metrics", put(update_metrics))
        .route("/bmi", get(get_bmi))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = Profile::get_or_create(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(profile.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GoalsRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    if let Err(e) = payload.validate() {
        warn!(error = %e, "goals rejected");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    // Ensure the row exists before the single-row update
    Profile::get_or_create(&state.db, user_id)
        .await
        .map_err(internal)?;
    let profile = Profile::update_goals(&state.db, user_id, payload.into_goals())
        .await
        .map_err(internal)?;

    info!(user_id = %user_id, "goals updated");
    Ok(Json(profile.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_metrics(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<MetricsRequest>,
) -> Result<Json<BmiResponse>, (StatusCode, String)> {
    if let Err(e) = payload.validate() {
        warn!(error = %e, "metrics rejected");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    Profile::get_or_create(&state.db, user_id)
        .await
        .map_err(internal)?;
    let profile = Profile::update_metrics(&state.db, user_id, payload.height, payload.weight)
        .await
        .map_err(internal)?;

    info!(user_id = %user_id, "body metrics updated");
    Ok(Json(bmi_response(&profile)))
}

#[instrument(skip(state))]
pub async fn get_bmi(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<BmiResponse>, (StatusCode, String)> {
    let profile = Profile::get_or_create(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(bmi_response(&profile)))
}

fn bmi_response(profile: &Profile) -> BmiResponse {
    let bmi = compute_bmi(profile.height, profile.weight);
    let category = bmi.map(BmiCategory::classify);
    BmiResponse {
        bmi,
        category,
        interpretation: category
            .map(|c| c.interpretation().to_string())
            .unwrap_or_default(),
    }
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn profile(height: Option<f64>, weight: Option<f64>) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            daily_calorie_goal: 2000,
            daily_protein_goal: 50,
            daily_carbs_goal: 300,
            daily_fat_goal: 70,
            height,
            weight,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn bmi_response_for_stored_metrics() {
        let r = bmi_response(&profile(Some(170.0), Some(70.0)));
        assert_eq!(r.bmi, Some(24.2));
        assert_eq!(r.category, Some(BmiCategory::Normal));
        assert_eq!(r.interpretation, "Great! Maintain your healthy weight.");
    }

    #[test]
    fn bmi_response_when_metrics_missing() {
        let r = bmi_response(&profile(None, Some(70.0)));
        assert_eq!(r.bmi, None);
        assert_eq!(r.category, None);
        assert!(r.interpretation.is_empty());
    }
}

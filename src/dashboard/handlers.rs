use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use time::{macros::format_description, Date, OffsetDateTime};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    dashboard::{
        dto::{DashboardResponse, WeekEntry, WeekResponse},
        services::{self, DailySummary},
    },
    meals::{dto::MealItem, Meal},
    profile::Profile,
    state::AppState,
};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/week", get(week))
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

fn resolve_date(raw: Option<&str>) -> Result<Date, (StatusCode, String)> {
    match raw {
        Some(s) => {
            let fmt = format_description!("[year]-[month]-[day]");
            Date::parse(s, &fmt).map_err(|_| (StatusCode::BAD_REQUEST, "Invalid date".to_string()))
        }
        None => Ok(OffsetDateTime::now_utc().date()),
    }
}

async fn summary_for(
    state: &AppState,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<(Vec<Meal>, DailySummary)> {
    let meals = Meal::list_by_user_and_date(&state.db, user_id, date).await?;
    let summary = DailySummary::from_meals(&meals);
    Ok((meals, summary))
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let date = resolve_date(q.date.as_deref())?;

    let (meals, summary) = summary_for(&state, user_id, date).await.map_err(internal)?;
    let profile = Profile::get_or_create(&state.db, user_id)
        .await
        .map_err(internal)?;

    let progress = services::progress(&summary, &profile);
    let warnings = services::warnings(&summary, &profile);

    Ok(Json(DashboardResponse {
        date,
        meals: meals.into_iter().map(MealItem::from).collect(),
        summary,
        progress,
        warnings,
    }))
}

#[instrument(skip(state))]
pub async fn week(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<WeekResponse>, (StatusCode, String)> {
    let end = resolve_date(q.date.as_deref())?;

    let mut days = Vec::with_capacity(7);
    for date in services::week_dates(end) {
        let (_, summary) = summary_for(&state, user_id, date).await.map_err(internal)?;
        days.push(WeekEntry {
            date,
            label: services::day_label(date),
            calories: summary.total_calories,
            protein: summary.total_protein,
            carbs: summary.total_carbs,
            fat: summary.total_fat,
        });
    }

    Ok(Json(WeekResponse { days }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_date_parses_iso_days() {
        let d = resolve_date(Some("2026-08-06")).unwrap();
        assert_eq!(d, time::macros::date!(2026 - 08 - 06));
    }

    #[test]
    fn resolve_date_rejects_garbage() {
        assert!(resolve_date(Some("not-a-date")).is_err());
        assert!(resolve_date(Some("2026-13-01")).is_err());
    }

    #[test]
    fn resolve_date_defaults_to_today() {
        let d = resolve_date(None).unwrap();
        assert_eq!(d, OffsetDateTime::now_utc().date());
    }
}

use serde::Serialize;
use time::Date;

use crate::dashboard::services::{DailySummary, GoalProgress};
use crate::meals::dto::MealItem;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub date: Date,
    pub meals: Vec<MealItem>,
    pub summary: DailySummary,
    pub progress: GoalProgress,
    pub warnings: Vec<String>,
}

/// One point of the weekly trend series.
#[derive(Debug, Serialize)]
pub struct WeekEntry {
    pub date: Date,
    pub label: &'static str,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub days: Vec<WeekEntry>,
}

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Per-user nutrition profile: daily goals plus optional body metrics.
/// Exactly one row per user, enforced by a unique constraint on user_id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub daily_calorie_goal: i32,
    pub daily_protein_goal: i32,
    pub daily_carbs_goal: i32,
    pub daily_fat_goal: i32,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy)]
pub struct DailyGoals {
    pub daily_calorie_goal: i32,
    pub daily_protein_goal: i32,
    pub daily_carbs_goal: i32,
    pub daily_fat_goal: i32,
}

const PROFILE_COLUMNS: &str = "id, user_id, daily_calorie_goal, daily_protein_goal, \
     daily_carbs_goal, daily_fat_goal, height, weight, created_at, updated_at";

impl Profile {
    /// Fetch the user's profile, creating one with the default goals on
    /// first access. Concurrent first accesses race on the insert; the
    /// unique constraint makes the loser's insert a no-op.
    pub async fn get_or_create(db: &PgPool, user_id: Uuid) -> anyhow::Result<Profile> {
        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(db)
            .await?;

        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(profile)
    }

    pub async fn update_goals(
        db: &PgPool,
        user_id: Uuid,
        goals: DailyGoals,
    ) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET daily_calorie_goal = $2,
                daily_protein_goal = $3,
                daily_carbs_goal = $4,
                daily_fat_goal = $5,
                updated_at = now()
            WHERE user_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(goals.daily_calorie_goal)
        .bind(goals.daily_protein_goal)
        .bind(goals.daily_carbs_goal)
        .bind(goals.daily_fat_goal)
        .fetch_one(db)
        .await?;
        Ok(profile)
    }

    pub async fn update_metrics(
        db: &PgPool,
        user_id: Uuid,
        height: Option<f64>,
        weight: Option<f64>,
    ) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET height = $2,
                weight = $3,
                updated_at = now()
            WHERE user_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(height)
        .bind(weight)
        .fetch_one(db)
        .await?;
        Ok(profile)
    }
}

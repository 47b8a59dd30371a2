use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Closed set of meal slots; ordering follows the enum definition
/// (breakfast first) both here and in Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "meal_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: i32,
    pub carbohydrates: i32,
    pub protein: i32,
    pub fat: i32,
    pub date: Date,
    pub created_at: OffsetDateTime,
}

/// Fields supplied by the client when logging a meal. The entry date is
/// always the creation day and is immutable afterwards.
#[derive(Debug, Clone)]
pub struct NewMeal {
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: i32,
    pub carbohydrates: i32,
    pub protein: i32,
    pub fat: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum MealError {
    #[error("Meal not found")]
    NotFound,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl Meal {
    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, meal_type, food_name, calories, carbohydrates, protein, fat,
                   date, created_at
            FROM meals
            WHERE user_id = $1
            ORDER BY date DESC, meal_type
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// All meals one user logged on one day, in meal-slot order.
    pub async fn list_by_user_and_date(
        db: &PgPool,
        user_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, meal_type, food_name, calories, carbohydrates, protein, fat,
                   date, created_at
            FROM meals
            WHERE user_id = $1 AND date = $2
            ORDER BY meal_type
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, user_id: Uuid, new: NewMeal) -> anyhow::Result<Meal> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (user_id, meal_type, food_name, calories, carbohydrates, protein, fat)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, meal_type, food_name, calories, carbohydrates, protein, fat,
                      date, created_at
            "#,
        )
        .bind(user_id)
        .bind(new.meal_type)
        .bind(&new.food_name)
        .bind(new.calories)
        .bind(new.carbohydrates)
        .bind(new.protein)
        .bind(new.fat)
        .fetch_one(db)
        .await?;
        Ok(meal)
    }

    /// Delete a meal scoped to its owner. Deleting someone else's meal
    /// behaves the same as deleting a meal that does not exist.
    pub async fn delete_owned(db: &PgPool, meal_id: Uuid, user_id: Uuid) -> Result<(), MealError> {
        let res = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(meal_id)
            .bind(user_id)
            .execute(db)
            .await?;
        if res.rows_affected() == 0 {
            return Err(MealError::NotFound);
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::meals::repo::{Meal, MealType, NewMeal};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be non-negative")]
    Negative(&'static str),
    #[error("food_name is required")]
    MissingFoodName,
}

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: i32,
    pub carbohydrates: i32,
    pub protein: i32,
    pub fat: i32,
}

impl CreateMealRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.food_name.trim().is_empty() {
            return Err(ValidationError::MissingFoodName);
        }
        for (name, value) in [
            ("calories", self.calories),
            ("carbohydrates", self.carbohydrates),
            ("protein", self.protein),
            ("fat", self.fat),
        ] {
            if value < 0 {
                return Err(ValidationError::Negative(name));
            }
        }
        Ok(())
    }

    pub fn into_new_meal(self) -> NewMeal {
        NewMeal {
            meal_type: self.meal_type,
            food_name: self.food_name.trim().to_string(),
            calories: self.calories,
            carbohydrates: self.carbohydrates,
            protein: self.protein,
            fat: self.fat,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealItem {
    pub id: Uuid,
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: i32,
    pub carbohydrates: i32,
    pub protein: i32,
    pub fat: i32,
    pub date: Date,
    pub created_at: OffsetDateTime,
}

impl From<Meal> for MealItem {
    fn from(m: Meal) -> Self {
        Self {
            id: m.id,
            meal_type: m.meal_type,
            food_name: m.food_name,
            calories: m.calories,
            carbohydrates: m.carbohydrates,
            protein: m.protein,
            fat: m.fat,
            date: m.date,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MealsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    pub date: Option<String>,
}

fn default_limit() -> i64 {
    20
}

use serde::{Deserialize, Serialize};

use crate::profile::repo::{DailyGoals, Profile};
use crate::profile::services::BmiCategory;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be non-negative")]
    Negative(&'static str),
    #[error("{0} must be positive")]
    NonPositive(&'static str),
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub daily_calorie_goal: i32,
    pub daily_protein_goal: i32,
    pub daily_carbs_goal: i32,
    pub daily_fat_goal: i32,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            daily_calorie_goal: p.daily_calorie_goal,
            daily_protein_goal: p.daily_protein_goal,
            daily_carbs_goal: p.daily_carbs_goal,
            daily_fat_goal: p.daily_fat_goal,
            height: p.height,
            weight: p.weight,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GoalsRequest {
    pub daily_calorie_goal: i32,
    pub daily_protein_goal: i32,
    pub daily_carbs_goal: i32,
    pub daily_fat_goal: i32,
}

impl GoalsRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("daily_calorie_goal", self.daily_calorie_goal),
            ("daily_protein_goal", self.daily_protein_goal),
            ("daily_carbs_goal", self.daily_carbs_goal),
            ("daily_fat_goal", self.daily_fat_goal),
        ] {
            if value < 0 {
                return Err(ValidationError::Negative(name));
            }
        }
        Ok(())
    }

    pub fn into_goals(self) -> DailyGoals {
        DailyGoals {
            daily_calorie_goal: self.daily_calorie_goal,
            daily_protein_goal: self.daily_protein_goal,
            daily_carbs_goal: self.daily_carbs_goal,
            daily_fat_goal: self.daily_fat_goal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MetricsRequest {
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl MetricsRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(h) = self.height {
            if h <= 0.0 {
                return Err(ValidationError::NonPositive("height"));
            }
        }
        if let Some(w) = self.weight {
            if w <= 0.0 {
                return Err(ValidationError::NonPositive("weight"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct BmiResponse {
    pub bmi: Option<f64>,
    pub category: Option<BmiCategory>,
    pub interpretation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goals_reject_negative_values() {
        let r = GoalsRequest {
            daily_calorie_goal: 2000,
            daily_protein_goal: -5,
            daily_carbs_goal: 300,
            daily_fat_goal: 70,
        };
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("daily_protein_goal"));
    }

    #[test]
    fn goals_accept_zero() {
        let r = GoalsRequest {
            daily_calorie_goal: 0,
            daily_protein_goal: 0,
            daily_carbs_goal: 0,
            daily_fat_goal: 0,
        };
        assert!(r.validate().is_ok());
    }

    #[test]
    fn metrics_reject_non_positive_values() {
        let r = MetricsRequest {
            height: Some(0.0),
            weight: Some(70.0),
        };
        assert!(r.validate().is_err());

        let r = MetricsRequest {
            height: Some(170.0),
            weight: Some(-1.0),
        };
        assert!(r.validate().is_err());
    }

    #[test]
    fn metrics_accept_absent_values() {
        let r = MetricsRequest {
            height: None,
            weight: None,
        };
        assert!(r.validate().is_ok());
    }

    #[test]
    fn bmi_response_serializes_absent_as_null() {
        let r = BmiResponse {
            bmi: None,
            category: None,
            interpretation: String::new(),
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"bmi\":null"));
        assert!(json.contains("\"category\":null"));
        assert!(json.contains("\"interpretation\":\"\""));
    }
}

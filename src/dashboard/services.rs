use serde::Serialize;
use time::{Date, Duration, Weekday};

use crate::meals::Meal;
use crate::profile::Profile;

/// Fraction of the calorie goal below which intake counts as very low.
const LOW_CALORIE_RATIO: f64 = 0.5;
/// Fraction of the protein goal below which intake counts as insufficient.
const LOW_PROTEIN_RATIO: f64 = 0.7;

/// Nutrient totals for one user on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub total_calories: i64,
    pub total_protein: i64,
    pub total_carbs: i64,
    pub total_fat: i64,
    pub meal_count: usize,
}

impl DailySummary {
    /// Plain sums over the day's meals; an empty day is all zeroes, not
    /// an error.
    pub fn from_meals(meals: &[Meal]) -> Self {
        Self {
            total_calories: meals.iter().map(|m| m.calories as i64).sum(),
            total_protein: meals.iter().map(|m| m.protein as i64).sum(),
            total_carbs: meals.iter().map(|m| m.carbohydrates as i64).sum(),
            total_fat: meals.iter().map(|m| m.fat as i64).sum(),
            meal_count: meals.len(),
        }
    }
}

/// Percentage of each daily goal achieved, capped at 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

fn percent(actual: i64, goal: i32) -> f64 {
    if goal > 0 {
        (100.0 * actual as f64 / goal as f64).min(100.0)
    } else {
        0.0
    }
}

pub fn progress(summary: &DailySummary, profile: &Profile) -> GoalProgress {
    GoalProgress {
        calories: percent(summary.total_calories, profile.daily_calorie_goal),
        protein: percent(summary.total_protein, profile.daily_protein_goal),
        carbs: percent(summary.total_carbs, profile.daily_carbs_goal),
        fat: percent(summary.total_fat, profile.daily_fat_goal),
    }
}

/// Advisory messages for the day, in a fixed order. The two calorie
/// checks are an if/else pair, so at most one of them fires; the protein
/// and carb checks are independent. With a zero calorie goal the
/// low-intake branch compares against zero and can never fire.
pub fn warnings(summary: &DailySummary, profile: &Profile) -> Vec<String> {
    let mut out = Vec::new();

    if summary.total_calories > profile.daily_calorie_goal as i64 {
        out.push("Your calorie intake exceeds your daily limit.".to_string());
    } else if (summary.total_calories as f64)
        < profile.daily_calorie_goal as f64 * LOW_CALORIE_RATIO
    {
        out.push("Your calorie intake is very low today.".to_string());
    }

    if (summary.total_protein as f64) < profile.daily_protein_goal as f64 * LOW_PROTEIN_RATIO {
        out.push("Your protein intake is lower than recommended.".to_string());
    }

    if summary.total_carbs > profile.daily_carbs_goal as i64 {
        out.push("Your carbohydrate intake exceeds your daily goal.".to_string());
    }

    out
}

/// The seven days ending at `end`, oldest first.
pub fn week_dates(end: Date) -> [Date; 7] {
    std::array::from_fn(|i| end - Duration::days((6 - i) as i64))
}

pub fn day_label(date: Date) -> &'static str {
    match date.weekday() {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::MealType;
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn meal(calories: i32, carbohydrates: i32, protein: i32, fat: i32) -> Meal {
        Meal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            meal_type: MealType::Lunch,
            food_name: "test food".into(),
            calories,
            carbohydrates,
            protein,
            fat,
            date: date!(2026 - 08 - 06),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn profile(calories: i32, protein: i32, carbs: i32, fat: i32) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            daily_calorie_goal: calories,
            daily_protein_goal: protein,
            daily_carbs_goal: carbs,
            daily_fat_goal: fat,
            height: None,
            weight: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    fn default_profile() -> Profile {
        profile(2000, 50, 300, 70)
    }

    #[test]
    fn summary_sums_each_nutrient() {
        let meals = vec![meal(400, 30, 20, 10), meal(600, 50, 35, 25), meal(0, 0, 0, 0)];
        let s = DailySummary::from_meals(&meals);
        assert_eq!(s.total_calories, 1000);
        assert_eq!(s.total_carbs, 80);
        assert_eq!(s.total_protein, 55);
        assert_eq!(s.total_fat, 35);
        assert_eq!(s.meal_count, 3);
    }

    #[test]
    fn summary_of_empty_day_is_all_zero() {
        let s = DailySummary::from_meals(&[]);
        assert_eq!(
            s,
            DailySummary {
                total_calories: 0,
                total_protein: 0,
                total_carbs: 0,
                total_fat: 0,
                meal_count: 0,
            }
        );
    }

    #[test]
    fn progress_is_proportional_below_goal() {
        let s = DailySummary::from_meals(&[meal(1000, 150, 25, 35)]);
        let p = progress(&s, &default_profile());
        assert_eq!(p.calories, 50.0);
        assert_eq!(p.protein, 50.0);
        assert_eq!(p.carbs, 50.0);
        assert_eq!(p.fat, 50.0);
    }

    #[test]
    fn progress_caps_at_one_hundred() {
        let s = DailySummary::from_meals(&[meal(5000, 800, 200, 300)]);
        let p = progress(&s, &default_profile());
        assert_eq!(p.calories, 100.0);
        assert_eq!(p.protein, 100.0);
        assert_eq!(p.carbs, 100.0);
        assert_eq!(p.fat, 100.0);
    }

    #[test]
    fn progress_is_zero_when_goal_is_zero() {
        let s = DailySummary::from_meals(&[meal(5000, 800, 200, 300)]);
        let p = progress(&s, &profile(0, 0, 0, 0));
        assert_eq!(p.calories, 0.0);
        assert_eq!(p.protein, 0.0);
        assert_eq!(p.carbs, 0.0);
        assert_eq!(p.fat, 0.0);
    }

    #[test]
    fn over_calorie_warning_fires_above_goal() {
        let s = DailySummary::from_meals(&[meal(2001, 0, 100, 0)]);
        let w = warnings(&s, &default_profile());
        assert!(w[0].contains("calorie intake exceeds"));
    }

    #[test]
    fn under_calorie_warning_fires_below_half_goal() {
        let s = DailySummary::from_meals(&[meal(999, 0, 100, 0)]);
        let w = warnings(&s, &default_profile());
        assert!(w[0].contains("very low"));
    }

    #[test]
    fn calorie_warnings_are_mutually_exclusive() {
        for calories in [0, 500, 999, 1000, 1500, 2000, 2001, 9000] {
            let s = DailySummary::from_meals(&[meal(calories, 0, 0, 0)]);
            let w = warnings(&s, &default_profile());
            let over = w.iter().any(|m| m.contains("exceeds your daily limit"));
            let under = w.iter().any(|m| m.contains("very low"));
            assert!(!(over && under), "both calorie warnings at {calories}");
        }
    }

    #[test]
    fn under_calorie_warning_unreachable_with_zero_goal() {
        // total < 0.5 * 0 never holds for non-negative totals
        let s = DailySummary::from_meals(&[]);
        let p = profile(0, 0, 0, 0);
        assert!(warnings(&s, &p).is_empty());
    }

    #[test]
    fn warnings_keep_fixed_order() {
        // Over on calories and carbs, low on protein: all three fire in order
        let s = DailySummary::from_meals(&[meal(2500, 400, 30, 0)]);
        let w = warnings(&s, &default_profile());
        assert_eq!(w.len(), 3);
        assert!(w[0].contains("calorie intake exceeds"));
        assert!(w[1].contains("protein intake is lower"));
        assert!(w[2].contains("carbohydrate intake exceeds"));
    }

    #[test]
    fn no_warning_for_fat() {
        let s = DailySummary::from_meals(&[meal(1500, 0, 100, 500)]);
        let p = profile(2000, 50, 300, 10);
        assert!(warnings(&s, &p).is_empty());
    }

    #[test]
    fn worked_example_default_goals() {
        // 2500 kcal and 30 g protein against the default goals
        let s = DailySummary::from_meals(&[meal(2500, 0, 30, 0)]);
        let p = default_profile();
        assert_eq!(progress(&s, &p).calories, 100.0);
        let w = warnings(&s, &p);
        assert!(w.iter().any(|m| m.contains("calorie intake exceeds")));
        assert!(w.iter().any(|m| m.contains("protein intake is lower")));
    }

    #[test]
    fn week_dates_span_seven_ascending_days() {
        let end = date!(2026 - 08 - 06);
        let days = week_dates(end);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date!(2026 - 07 - 31));
        assert_eq!(days[6], end);
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn day_labels_are_three_letter_english() {
        assert_eq!(day_label(date!(2026 - 08 - 03)), "Mon");
        assert_eq!(day_label(date!(2026 - 08 - 06)), "Thu");
        assert_eq!(day_label(date!(2026 - 08 - 09)), "Sun");
    }
}

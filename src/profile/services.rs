use serde::Serialize;

/// Body-mass index from height in centimetres and weight in kilograms,
/// rounded to one decimal (f64 `round`, ties away from zero). Missing or
/// zero inputs yield no value rather than an error.
pub fn compute_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let (height, weight) = match (height_cm, weight_kg) {
        (Some(h), Some(w)) if h != 0.0 && w != 0.0 => (h, w),
        _ => return None,
    };
    let height_m = height / 100.0;
    let bmi = weight / (height_m * height_m);
    Some((bmi * 10.0).round() / 10.0)
}

/// Weight-status band. Boundary values belong to the upper band:
/// 18.5 is Normal, 25 is Overweight, 30 is Obese.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn interpretation(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Consider consulting a healthcare provider.",
            BmiCategory::Normal => "Great! Maintain your healthy weight.",
            BmiCategory::Overweight => "Consider a balanced diet and exercise.",
            BmiCategory::Obese => "Consult with a healthcare provider.",
        }
    }
}

use crate::models::{Profile, Sex};

/// Basal Metabolic Rate via the Mifflin-St Jeor equation.
///
/// Male: 10*kg + 6.25*cm - 5*age + 5. Female: same with -161.
pub fn mifflin_st_jeor(sex: Sex, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Total Daily Energy Expenditure with the goal adjustment applied.
///
/// Cut: -15%. Bulk: +15%. Maintain: BMR x PAL unchanged.
pub fn daily_energy_target(profile: &Profile) -> f64 {
    let bmr = mifflin_st_jeor(
        profile.sex,
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
    );
    let tdee = bmr * profile.activity.multiplier();

    match profile.goal {
        crate::models::Goal::Cut => tdee * 0.85,
        crate::models::Goal::Bulk => tdee * 1.15,
        crate::models::Goal::Maintain => tdee,
    }
}

/// BMI category thresholds (Asia-Pacific standard).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// BMI rounded to one decimal, with its Asia-Pacific category.
pub fn bmi_and_category(weight_kg: f64, height_cm: f64) -> (f64, BmiCategory) {
    let h_m = height_cm / 100.0;
    let bmi = weight_kg / (h_m * h_m + 1e-9);
    let rounded = (bmi * 10.0).round() / 10.0;

    let category = if rounded < 18.5 {
        BmiCategory::Underweight
    } else if rounded <= 22.9 {
        BmiCategory::Normal
    } else if rounded <= 24.9 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };

    (rounded, category)
}

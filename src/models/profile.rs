use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Physical activity level (PAL categories).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Desk work, little exercise.
    Sedentary,
    /// Light daily activity.
    Light,
    /// Moderate exercise several times a week.
    Moderate,
    /// Hard daily exercise.
    Heavy,
    /// Athletes, heavy manual labor.
    VeryHeavy,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Heavy => 1.725,
            ActivityLevel::VeryHeavy => 1.9,
        }
    }
}

/// Diet goal, applied as a flat TDEE adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// 15% caloric deficit.
    Cut,
    /// Eat at maintenance.
    Maintain,
    /// 15% caloric surplus.
    Bulk,
}

/// Physiological profile used to size the daily energy target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub sex: Sex,
    pub age_years: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

/// Dietary constraints and plan parameters for one planning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub halal_required: bool,
    pub allergies: Vec<String>,
    pub diseases: Vec<String>,
    pub energy_target_kcal: f64,
    pub plan_days: u32,
}

impl UserPreferences {
    /// Unconstrained preferences for a given target and duration.
    pub fn unconstrained(energy_target_kcal: f64, plan_days: u32) -> Self {
        Self {
            halal_required: false,
            allergies: Vec::new(),
            diseases: Vec::new(),
            energy_target_kcal,
            plan_days,
        }
    }
}

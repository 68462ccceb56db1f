use crate::catalog::classify::classify;
use crate::models::{FoodCategory, FoodItem};
use crate::pipeline::constants::*;

/// Per-meal energy and macro gram targets derived from the daily target.
#[derive(Debug, Clone, Copy)]
pub struct MacroTargets {
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carb_g: f64,
}

impl MacroTargets {
    /// Derive per-meal targets from a daily energy target using the
    /// 50/20/30 carb/protein/fat calorie split.
    pub fn from_daily_target(energy_target_kcal: f64) -> Self {
        let meal_kcal = energy_target_kcal / MEALS_PER_DAY;
        Self {
            energy_kcal: meal_kcal,
            carb_g: CARB_CALORIE_SHARE * meal_kcal / KCAL_PER_G_CARB,
            protein_g: PROTEIN_CALORIE_SHARE * meal_kcal / KCAL_PER_G_PROTEIN,
            fat_g: FAT_CALORIE_SHARE * meal_kcal / KCAL_PER_G_FAT,
        }
    }
}

/// A candidate with its deviation scores. Lower is better throughout;
/// a perfect target fit scores exactly zero.
#[derive(Debug, Clone)]
pub struct ScoredFood {
    pub item: FoodItem,
    pub energy_score: f64,
    pub macro_score: f64,
    pub rule_score: f64,
    /// Filled by the ranker; equals `rule_score` until then.
    pub final_score: f64,
}

/// Relative deviation of `value` from `target`.
fn relative_deviation(value: f64, target: f64) -> f64 {
    (value - target).abs() / (target + EPSILON)
}

/// Score candidates against per-meal deviation targets.
///
/// Deterministic and total for well-formed non-negative inputs. Items that
/// arrive unclassified get their category assigned here.
pub fn score(candidates: Vec<FoodItem>, energy_target_kcal: f64) -> Vec<ScoredFood> {
    let targets = MacroTargets::from_daily_target(energy_target_kcal);

    candidates
        .into_iter()
        .map(|mut item| {
            if item.category == FoodCategory::Other {
                item.category = classify(&item.name, &item.group);
            }

            let energy_score =
                ENERGY_DEV_WEIGHT * relative_deviation(item.energy_kcal, targets.energy_kcal);
            let macro_score = PROTEIN_DEV_WEIGHT
                * relative_deviation(item.protein_g, targets.protein_g)
                + FAT_DEV_WEIGHT * relative_deviation(item.fat_g, targets.fat_g)
                + CARB_DEV_WEIGHT * relative_deviation(item.carb_g, targets.carb_g);
            let rule_score = energy_score + macro_score;

            ScoredFood {
                item,
                energy_score,
                macro_score,
                rule_score,
                final_score: rule_score,
            }
        })
        .collect()
}

use serde::{Deserialize, Serialize};

use crate::models::FoodCategory;

/// The three daily meal slots, in serving order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    /// Fraction of the daily energy target assigned to this slot.
    /// The three ratios sum to 1.0.
    pub fn energy_ratio(&self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.30,
            MealSlot::Lunch => 0.40,
            MealSlot::Dinner => 0.30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }

    /// Position within the day (0-based).
    pub fn index(&self) -> usize {
        match self {
            MealSlot::Breakfast => 0,
            MealSlot::Lunch => 1,
            MealSlot::Dinner => 2,
        }
    }
}

/// Aggregated nutrient totals for a meal or a day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub kcal: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carb_g: f64,
}

impl NutrientTotals {
    pub fn add(&mut self, other: &NutrientTotals) {
        self.kcal += other.kcal;
        self.protein_g += other.protein_g;
        self.fat_g += other.fat_g;
        self.carb_g += other.carb_g;
    }

    /// Percentage split of macro grams (protein, fat, carb).
    ///
    /// Drives the caller's chart summary. Returns (0, 0, 0) when no macros
    /// were accumulated.
    pub fn macro_split_pct(&self) -> (f64, f64, f64) {
        let total = self.protein_g + self.fat_g + self.carb_g;
        if total <= 0.0 {
            return (0.0, 0.0, 0.0);
        }
        (
            self.protein_g / total * 100.0,
            self.fat_g / total * 100.0,
            self.carb_g / total * 100.0,
        )
    }
}

/// One selected food scaled to its portion weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedItem {
    pub name: String,
    pub category: FoodCategory,

    /// Portion weight in grams, bounded to [30, 400].
    pub portion_g: f64,

    pub kcal: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carb_g: f64,
}

/// One meal: a slot, its selected items, and their aggregated totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub slot: MealSlot,
    pub items: Vec<PlannedItem>,
    pub total: NutrientTotals,
}

/// One planned day (1-based index) with per-day aggregated totals.
///
/// `partial` is set when a mandatory category had to be substituted or
/// omitted for any slot of the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub meals: Vec<Meal>,
    pub total: NutrientTotals,
    pub partial: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_ratios_sum_to_one() {
        let sum: f64 = MealSlot::ALL.iter().map(|s| s.energy_ratio()).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_macro_split_pct() {
        let totals = NutrientTotals {
            kcal: 400.0,
            protein_g: 20.0,
            fat_g: 20.0,
            carb_g: 60.0,
        };
        let (p, f, c) = totals.macro_split_pct();
        assert!((p - 20.0).abs() < 1e-9);
        assert!((f - 20.0).abs() < 1e-9);
        assert!((c - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_macro_split_empty() {
        let totals = NutrientTotals::default();
        assert_eq!(totals.macro_split_pct(), (0.0, 0.0, 0.0));
    }
}

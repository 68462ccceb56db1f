use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::models::{DayPlan, FoodCategory, FoodItem, Meal, MealSlot, NutrientTotals, PlannedItem};
use crate::pipeline::constants::{DEFAULT_POOL_SIZE, MAX_PORTION_G, MIN_PORTION_G};
use crate::pipeline::scoring::ScoredFood;

/// Categories every meal must contain when the pools allow it.
const MANDATORY_CATEGORIES: [FoodCategory; 3] = [
    FoodCategory::Staple,
    FoodCategory::Protein,
    FoodCategory::Vegetable,
];

/// How an item is picked from a category pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Deterministic rotating offset indexed by day and slot. Guarantees a
    /// different pick for the same slot on consecutive days when the pool
    /// holds more than one item.
    Rotating,
    /// Seeded pseudo-random draw. Reproducible for a fixed seed; a draw
    /// repeating the previous day's pick for the same slot and category is
    /// nudged to the next pool entry.
    Seeded(u64),
}

#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Best-ranked slice kept per category pool, to avoid serving the
    /// single globally-best item in every slot.
    pub pool_size: usize,
    pub strategy: SelectionStrategy,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            strategy: SelectionStrategy::Rotating,
        }
    }
}

/// Slot-conditional optional categories: dairy at breakfast, fruit at the
/// two larger meals.
fn optional_categories(slot: MealSlot) -> &'static [FoodCategory] {
    match slot {
        MealSlot::Breakfast => &[FoodCategory::Milk],
        MealSlot::Lunch | MealSlot::Dinner => &[FoodCategory::Fruit],
    }
}

/// Bounded best-ranked head per category. Input must already be sorted
/// ascending by final score.
fn build_pools(
    ranked: &[ScoredFood],
    pool_size: usize,
) -> HashMap<FoodCategory, Vec<&FoodItem>> {
    let mut pools: HashMap<FoodCategory, Vec<&FoodItem>> = HashMap::new();
    for scored in ranked {
        let pool = pools.entry(scored.item.category).or_default();
        if pool.len() < pool_size {
            pool.push(&scored.item);
        }
    }
    pools
}

struct Selector {
    rng: Option<StdRng>,
    /// Previous pick per (slot, category), for the back-to-back guard.
    previous: HashMap<(MealSlot, FoodCategory), String>,
}

impl Selector {
    fn new(strategy: SelectionStrategy) -> Self {
        let rng = match strategy {
            SelectionStrategy::Rotating => None,
            SelectionStrategy::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
        };
        Self {
            rng,
            previous: HashMap::new(),
        }
    }

    fn pick<'a>(
        &mut self,
        pool: &[&'a FoodItem],
        day_index: usize,
        slot: MealSlot,
        category: FoodCategory,
    ) -> Option<&'a FoodItem> {
        if pool.is_empty() {
            return None;
        }

        let mut idx = match &mut self.rng {
            Some(rng) => rng.gen_range(0..pool.len()),
            None => (day_index + slot.index()) % pool.len(),
        };

        // Never repeat the previous day's pick for the same slot+category
        // when an alternative exists.
        if pool.len() > 1 {
            if let Some(prev) = self.previous.get(&(slot, category)) {
                if pool[idx].key() == *prev {
                    idx = (idx + 1) % pool.len();
                }
            }
        }

        let picked = pool[idx];
        self.previous.insert((slot, category), picked.key());
        Some(picked)
    }
}

/// Uniform portion for a slot's selected items: scale the 100 g reference
/// toward the slot target, clamped per item to the portion bounds, rounded
/// to whole grams.
fn slot_portion_g(selected: &[&FoodItem], slot_target_kcal: f64) -> f64 {
    let base_kcal: f64 = selected.iter().map(|i| i.energy_kcal).sum();
    let scale = if base_kcal > 0.0 {
        slot_target_kcal / base_kcal
    } else {
        1.0
    };
    (100.0 * scale).clamp(MIN_PORTION_G, MAX_PORTION_G).round()
}

/// Compose a multi-day plan from ranked candidates.
///
/// For each day and slot, picks one item per mandatory category (staple,
/// protein, vegetable) and per slot-conditional optional category, scales a
/// uniform portion toward the slot's share of the daily target, and
/// aggregates totals bottom-up. Missing mandatory pools degrade to the
/// `Other` pool, or to omission, never to a failed plan.
pub fn compose(
    ranked: &[ScoredFood],
    energy_target_kcal: f64,
    days: u32,
    config: &ComposerConfig,
) -> Vec<DayPlan> {
    let pools = build_pools(ranked, config.pool_size.max(1));
    let empty: Vec<&FoodItem> = Vec::new();
    let pool_of = |cat: FoodCategory| pools.get(&cat).unwrap_or(&empty);

    let mut selector = Selector::new(config.strategy);
    let mut plan = Vec::with_capacity(days as usize);

    for day_index in 0..days as usize {
        let mut meals = Vec::with_capacity(MealSlot::ALL.len());
        let mut day_total = NutrientTotals::default();
        let mut partial = false;

        for slot in MealSlot::ALL {
            let slot_target_kcal = energy_target_kcal * slot.energy_ratio();

            let mut selected: Vec<&FoodItem> = Vec::new();
            for category in MANDATORY_CATEGORIES {
                let pool = pool_of(category);
                match selector.pick(pool, day_index, slot, category) {
                    Some(item) => selected.push(item),
                    None => {
                        // Degrade: substitute from the leftover pool, else omit.
                        let fallback = pool_of(FoodCategory::Other);
                        match selector.pick(fallback, day_index, slot, category) {
                            Some(item) => {
                                warn!(
                                    day = day_index + 1,
                                    slot = slot.label(),
                                    category = category.label(),
                                    substitute = %item.name,
                                    "empty category pool, substituting"
                                );
                                selected.push(item);
                            }
                            None => {
                                warn!(
                                    day = day_index + 1,
                                    slot = slot.label(),
                                    category = category.label(),
                                    "empty category pool, omitting"
                                );
                            }
                        }
                        partial = true;
                    }
                }
            }
            for &category in optional_categories(slot) {
                if let Some(item) = selector.pick(pool_of(category), day_index, slot, category) {
                    selected.push(item);
                }
            }

            let portion_g = slot_portion_g(&selected, slot_target_kcal);

            let mut meal_total = NutrientTotals::default();
            let items: Vec<PlannedItem> = selected
                .iter()
                .map(|item| {
                    let (kcal, protein_g, fat_g, carb_g) = item.scaled(portion_g);
                    meal_total.add(&NutrientTotals {
                        kcal,
                        protein_g,
                        fat_g,
                        carb_g,
                    });
                    PlannedItem {
                        name: item.name.clone(),
                        category: item.category,
                        portion_g,
                        kcal,
                        protein_g,
                        fat_g,
                        carb_g,
                    }
                })
                .collect();

            day_total.add(&meal_total);
            meals.push(Meal {
                slot,
                items,
                total: meal_total,
            });
        }

        debug!(
            day = day_index + 1,
            kcal = day_total.kcal,
            partial,
            "composed day"
        );

        plan.push(DayPlan {
            day: day_index as u32 + 1,
            meals,
            total: day_total,
            partial,
        });
    }

    plan
}

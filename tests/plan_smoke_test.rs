use assert_float_eq::assert_float_relative_eq;

use nutriplan_rs::catalog::Catalog;
use nutriplan_rs::models::{FoodCategory, FoodItem, MealSlot, UserPreferences};
use nutriplan_rs::pipeline::{
    self, compose, rank, score, ComposerConfig, FilterOptions, SelectionStrategy,
};

fn make_item(name: &str, category: FoodCategory, kcal: f64, p: f64, f: f64, c: f64) -> FoodItem {
    FoodItem {
        name: name.to_string(),
        group: String::new(),
        category,
        energy_kcal: kcal,
        protein_g: p,
        fat_g: f,
        carb_g: c,
        halal: None,
        allergy_tags: None,
        disease_tags: None,
        sodium_mg: None,
        sugar_g: None,
    }
}

/// 10-item catalog: 3 staples, 3 proteins, 2 vegetables, 2 fruits.
fn example_items() -> Vec<FoodItem> {
    vec![
        make_item("Nasi putih", FoodCategory::Staple, 180.0, 3.0, 0.3, 39.8),
        make_item("Kentang rebus", FoodCategory::Staple, 90.0, 2.0, 0.1, 20.0),
        make_item("Roti tawar", FoodCategory::Staple, 250.0, 8.0, 3.0, 48.0),
        make_item("Ayam panggang", FoodCategory::Protein, 200.0, 27.0, 10.0, 0.0),
        make_item("Tempe goreng", FoodCategory::Protein, 190.0, 18.0, 9.0, 8.0),
        make_item("Telur rebus", FoodCategory::Protein, 150.0, 12.5, 10.0, 1.0),
        make_item("Bayam kukus", FoodCategory::Vegetable, 25.0, 2.9, 0.4, 3.6),
        make_item("Wortel rebus", FoodCategory::Vegetable, 35.0, 0.9, 0.2, 8.0),
        make_item("Pisang ambon", FoodCategory::Fruit, 90.0, 1.1, 0.3, 23.0),
        make_item("Pepaya", FoodCategory::Fruit, 45.0, 0.5, 0.1, 11.0),
    ]
}

fn ranked_example() -> Vec<nutriplan_rs::pipeline::ScoredFood> {
    rank(score(example_items(), 2100.0), None).ranked
}

#[test]
fn test_example_scenario_two_day_plan() {
    let plan = compose(&ranked_example(), 2100.0, 2, &ComposerConfig::default());

    assert_eq!(plan.len(), 2);

    for day in &plan {
        assert_eq!(day.meals.len(), 3);
        assert!(!day.partial);

        // Slot order and ratio coverage
        let slots: Vec<MealSlot> = day.meals.iter().map(|m| m.slot).collect();
        assert_eq!(slots, vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner]);
        let ratio_sum: f64 = day.meals.iter().map(|m| m.slot.energy_ratio()).sum();
        assert_float_relative_eq!(ratio_sum, 1.0, 1e-9);

        for meal in &day.meals {
            for category in [
                FoodCategory::Staple,
                FoodCategory::Protein,
                FoodCategory::Vegetable,
            ] {
                assert!(
                    meal.items.iter().any(|i| i.category == category),
                    "{} of day {} lacks {}",
                    meal.slot.label(),
                    day.day,
                    category.label()
                );
            }
        }

        // Daily calories within the scaling tolerance of the target
        assert!(
            (day.total.kcal - 2100.0).abs() <= 0.15 * 2100.0,
            "day {} total {} outside +/-15% of 2100",
            day.day,
            day.total.kcal
        );
    }
}

#[test]
fn test_portion_bounds_hold_everywhere() {
    for days in [1, 3, 7] {
        let plan = compose(&ranked_example(), 2100.0, days, &ComposerConfig::default());
        for day in &plan {
            for meal in &day.meals {
                for item in &meal.items {
                    assert!(item.portion_g >= 30.0, "{} below 30 g", item.name);
                    assert!(item.portion_g <= 400.0, "{} above 400 g", item.name);
                }
            }
        }
    }
}

#[test]
fn test_day_totals_equal_meal_sums() {
    let plan = compose(&ranked_example(), 2100.0, 3, &ComposerConfig::default());

    for day in &plan {
        let kcal: f64 = day.meals.iter().map(|m| m.total.kcal).sum();
        let protein: f64 = day.meals.iter().map(|m| m.total.protein_g).sum();
        let fat: f64 = day.meals.iter().map(|m| m.total.fat_g).sum();
        let carb: f64 = day.meals.iter().map(|m| m.total.carb_g).sum();

        assert_float_relative_eq!(day.total.kcal, kcal, 1e-6);
        assert_float_relative_eq!(day.total.protein_g, protein, 1e-6);
        assert_float_relative_eq!(day.total.fat_g, fat, 1e-6);
        assert_float_relative_eq!(day.total.carb_g, carb, 1e-6);
    }
}

fn plan_item_names(plan: &[nutriplan_rs::DayPlan]) -> Vec<String> {
    plan.iter()
        .flat_map(|d| d.meals.iter())
        .flat_map(|m| m.items.iter())
        .map(|i| format!("{}:{}:{}", i.name, i.portion_g, i.kcal))
        .collect()
}

#[test]
fn test_rotation_is_deterministic() {
    let config = ComposerConfig::default();
    let a = compose(&ranked_example(), 2100.0, 5, &config);
    let b = compose(&ranked_example(), 2100.0, 5, &config);
    assert_eq!(plan_item_names(&a), plan_item_names(&b));
}

#[test]
fn test_fixed_seed_is_deterministic() {
    let config = ComposerConfig {
        pool_size: 10,
        strategy: SelectionStrategy::Seeded(7),
    };
    let a = compose(&ranked_example(), 2100.0, 5, &config);
    let b = compose(&ranked_example(), 2100.0, 5, &config);
    assert_eq!(plan_item_names(&a), plan_item_names(&b));
}

#[test]
fn test_full_pipeline_excludes_allergen_from_plan() {
    let mut items = example_items();
    // Tag every protein as seafood-adjacent except tempe and telur
    for item in items.iter_mut() {
        if item.name == "Ayam panggang" {
            item.name = "Udang panggang".to_string();
            item.allergy_tags = Some("udang".to_string());
        }
    }
    let catalog = Catalog::new(items);

    let preferences = UserPreferences {
        halal_required: false,
        allergies: vec!["Seafood".to_string()],
        diseases: Vec::new(),
        energy_target_kcal: 2100.0,
        plan_days: 4,
    };

    let output = pipeline::generate_plan(
        &catalog,
        &preferences,
        &FilterOptions::default(),
        None,
        &ComposerConfig::default(),
    )
    .unwrap();

    assert_eq!(output.candidate_count, 9);
    assert!(output.degraded); // no bundle supplied

    for day in &output.days {
        for meal in &day.meals {
            for item in &meal.items {
                assert_ne!(item.name, "Udang panggang");
            }
        }
    }
}

use crate::catalog::Catalog;
use crate::models::DayPlan;
use crate::nutrition::BmiCategory;
use crate::pipeline::ScoredFood;

/// Display the user's computed energy summary before the plan.
pub fn display_energy_summary(bmr: f64, target_kcal: f64, bmi: f64, bmi_cat: BmiCategory) {
    println!();
    println!("BMR: {:.0} kcal   Daily target: {:.0} kcal", bmr, target_kcal);
    println!("BMI: {:.1} ({})", bmi, bmi_cat.label());
    println!();
}

/// Display a multi-day plan as per-meal tables with day summaries.
pub fn display_plan(plan: &[DayPlan], target_kcal: f64) {
    if plan.is_empty() {
        println!("No plan generated.");
        return;
    }

    for day in plan {
        let partial_tag = if day.partial { "  [partial]" } else { "" };
        println!(
            "=== Day {}: {:.0} kcal (target {:.0}){}",
            day.day, day.total.kcal, target_kcal, partial_tag
        );

        for meal in &day.meals {
            println!();
            println!(
                "  {} (~{:.0} kcal target, {:.0} planned)",
                meal.slot.label(),
                target_kcal * meal.slot.energy_ratio(),
                meal.total.kcal
            );

            let max_name_len = meal
                .items
                .iter()
                .map(|i| i.name.len())
                .max()
                .unwrap_or(10);

            for item in &meal.items {
                println!(
                    "    {:<10} {:<width$} {:>4.0} g {:>6.0} kcal  P:{:>5.1} F:{:>5.1} C:{:>5.1}",
                    item.category.label(),
                    item.name,
                    item.portion_g,
                    item.kcal,
                    item.protein_g,
                    item.fat_g,
                    item.carb_g,
                    width = max_name_len
                );
            }
        }

        let (p, f, c) = day.total.macro_split_pct();
        println!();
        println!(
            "  Day total: {:.0} kcal, P:{:.1} g F:{:.1} g C:{:.1} g (split {:.0}/{:.0}/{:.0}%)",
            day.total.kcal, day.total.protein_g, day.total.fat_g, day.total.carb_g, p, f, c
        );
        println!();
    }
}

/// Display the ranked candidate table (diagnostic view).
pub fn display_candidates(candidates: &[ScoredFood], limit: usize) {
    if candidates.is_empty() {
        println!("No candidates to display.");
        return;
    }

    println!();
    println!("=== Top {} candidates (lower score = better fit) ===", limit.min(candidates.len()));
    println!();

    let shown = &candidates[..limit.min(candidates.len())];
    let max_name_len = shown.iter().map(|c| c.item.name.len()).max().unwrap_or(10);

    for (i, c) in shown.iter().enumerate() {
        println!(
            "{:>3}. {:<width$} {:<10} final:{:>7.4} rule:{:>7.4} (E:{:>6.4} M:{:>6.4})",
            i + 1,
            c.item.name,
            c.item.category.label(),
            c.final_score,
            c.rule_score,
            c.energy_score,
            c.macro_score,
            width = max_name_len
        );
    }
    println!();
}

/// Display catalog statistics and the extracted tag vocabulary.
pub fn display_catalog_info(catalog: &Catalog) {
    println!();
    println!("=== Catalog ({} items) ===", catalog.len());
    println!();

    for (category, count) in catalog.category_counts() {
        println!("  {:<10} {}", category.label(), count);
    }

    println!();
    println!("Allergy options: {}", catalog.allergy_options().join(", "));
    println!("Disease options: {}", catalog.disease_options().join(", "));
    println!();
}

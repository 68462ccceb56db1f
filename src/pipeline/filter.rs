use tracing::debug;

use crate::catalog::classify::{canonical_allergy, canonical_disease};
use crate::catalog::{split_tags, Catalog};
use crate::error::{PlanError, Result};
use crate::models::{FoodItem, UserPreferences};
use crate::pipeline::constants::{DIABETES_SUGAR_LIMIT_G, HYPERTENSION_SODIUM_LIMIT_MG};

/// Halal marker values accepted when halal filtering is on.
const HALAL_ALLOWED: [&str; 4] = ["halal", "ya", "1", "true"];

/// Filter policy knobs.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Keep items with no halal metadata when halal is required.
    /// Off by default: absent metadata excludes the item.
    pub missing_halal_passes: bool,
}

/// Surviving candidates plus per-stage removal counts for diagnostics.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub candidates: Vec<FoodItem>,
    pub removed_halal: usize,
    pub removed_allergy: usize,
    pub removed_disease: usize,
}

/// Remove catalog items that violate halal, allergy, or disease
/// constraints. Enabling an additional constraint never grows the result.
///
/// An empty survivor set is the terminal `NoCandidates` outcome carrying
/// the per-stage counts.
pub fn filter(
    catalog: &Catalog,
    preferences: &UserPreferences,
    options: &FilterOptions,
) -> Result<FilterOutcome> {
    let allergy_tokens = normalize_tokens(&preferences.allergies);
    let disease_tokens = normalize_tokens(&preferences.diseases);

    let mut candidates = Vec::new();
    let mut removed_halal = 0usize;
    let mut removed_allergy = 0usize;
    let mut removed_disease = 0usize;

    for item in catalog.items() {
        if preferences.halal_required && !halal_passes(item, options) {
            removed_halal += 1;
            continue;
        }
        if violates_allergy(item, &allergy_tokens) {
            removed_allergy += 1;
            continue;
        }
        if violates_disease(item, &disease_tokens) {
            removed_disease += 1;
            continue;
        }
        candidates.push(item.clone());
    }

    debug!(
        kept = candidates.len(),
        removed_halal, removed_allergy, removed_disease, "constraint filter applied"
    );

    if candidates.is_empty() {
        return Err(PlanError::NoCandidates {
            removed_halal,
            removed_allergy,
            removed_disease,
        });
    }

    Ok(FilterOutcome {
        candidates,
        removed_halal,
        removed_allergy,
        removed_disease,
    })
}

fn normalize_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn halal_passes(item: &FoodItem, options: &FilterOptions) -> bool {
    match &item.halal {
        Some(marker) => {
            let m = marker.trim().to_lowercase();
            HALAL_ALLOWED.iter().any(|allowed| m == *allowed)
        }
        None => options.missing_halal_passes,
    }
}

/// An item violates an allergy constraint when any of its tag tokens equals
/// a user token, or both map to the same canonical label. Token equality
/// only; no raw substring matching against the cell.
fn violates_allergy(item: &FoodItem, user_tokens: &[String]) -> bool {
    if user_tokens.is_empty() {
        return false;
    }
    let Some(tags) = &item.allergy_tags else {
        return false;
    };

    for tag in split_tags(tags) {
        let tag_lower = tag.to_lowercase();
        let tag_canonical = canonical_allergy(tag);

        for user in user_tokens {
            if tag_lower == *user {
                return true;
            }
            if let (Some(t), Some(u)) = (tag_canonical, canonical_allergy(user)) {
                if t == u {
                    return true;
                }
            }
        }
    }
    false
}

fn violates_disease(item: &FoodItem, user_tokens: &[String]) -> bool {
    if user_tokens.is_empty() {
        return false;
    }

    // Token/canonical match against the restriction tags.
    if let Some(tags) = &item.disease_tags {
        for tag in split_tags(tags) {
            let tag_lower = tag.to_lowercase();
            let tag_canonical = canonical_disease(tag);

            for user in user_tokens {
                if tag_lower == *user {
                    return true;
                }
                if let (Some(t), Some(u)) = (tag_canonical, canonical_disease(user)) {
                    if t == u {
                        return true;
                    }
                }
            }
        }
    }

    // Hard numeric thresholds when the catalog carries the fields.
    let has = |label: &str| {
        user_tokens
            .iter()
            .any(|u| canonical_disease(u) == Some(label))
    };

    if has("Hypertension") {
        if let Some(sodium) = item.sodium_mg {
            if sodium >= HYPERTENSION_SODIUM_LIMIT_MG {
                return true;
            }
        }
    }
    if has("Diabetes") {
        if let Some(sugar) = item.sugar_g {
            if sugar >= DIABETES_SUGAR_LIMIT_G {
                return true;
            }
        }
    }

    false
}

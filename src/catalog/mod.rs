pub mod classify;
pub mod loader;

use std::collections::BTreeSet;
use std::collections::HashMap;

use crate::catalog::classify::{
    canonical_allergy, canonical_disease, DEFAULT_ALLERGY_OPTIONS, DEFAULT_DISEASE_OPTIONS,
};
use crate::models::{FoodCategory, FoodItem};

pub use loader::{load_catalog, ColumnMap};

/// Immutable food-composition catalog.
///
/// Built once by the loader, deduplicated by case-insensitive name (last
/// occurrence wins), then passed by reference into the pipeline. The
/// pipeline never mutates it; there is no process-wide cache.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<FoodItem>,
}

impl Catalog {
    /// Build a catalog from raw rows, deduplicating by lowercase name.
    pub fn new(items: Vec<FoodItem>) -> Self {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut deduped: Vec<FoodItem> = Vec::with_capacity(items.len());

        for item in items {
            match seen.get(&item.key()) {
                Some(&idx) => deduped[idx] = item,
                None => {
                    seen.insert(item.key(), deduped.len());
                    deduped.push(item);
                }
            }
        }

        Self { items: deduped }
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&FoodItem> {
        let key = name.to_lowercase();
        self.items.iter().find(|item| item.key() == key)
    }

    /// Number of items per category, in `FoodCategory::ALL` order.
    pub fn category_counts(&self) -> Vec<(FoodCategory, usize)> {
        FoodCategory::ALL
            .iter()
            .map(|&cat| {
                let count = self.items.iter().filter(|i| i.category == cat).count();
                (cat, count)
            })
            .collect()
    }

    /// Canonical allergy labels present in the catalog's tag column.
    ///
    /// Falls back to the standard label set when the catalog carries no
    /// recognizable tags.
    pub fn allergy_options(&self) -> Vec<String> {
        let mut labels = BTreeSet::new();
        for item in &self.items {
            if let Some(tags) = &item.allergy_tags {
                for token in split_tags(tags) {
                    if let Some(label) = canonical_allergy(token) {
                        labels.insert(label.to_string());
                    }
                }
            }
        }

        if labels.is_empty() {
            DEFAULT_ALLERGY_OPTIONS.iter().map(|s| s.to_string()).collect()
        } else {
            labels.into_iter().collect()
        }
    }

    /// Canonical disease labels present in the catalog's tag column.
    ///
    /// Cells that read as positive recommendations ("baik untuk...",
    /// "aman...") are advice, not restrictions, and are skipped.
    pub fn disease_options(&self) -> Vec<String> {
        const ADVICE_MARKERS: &[&str] = &[
            "baik", "aman", "sumber", "rendah", "pilihan", "mencegah", "anjuran",
        ];

        let mut labels = BTreeSet::new();
        for item in &self.items {
            if let Some(tags) = &item.disease_tags {
                let lower = tags.to_lowercase();
                if ADVICE_MARKERS.iter().any(|m| lower.contains(m)) {
                    continue;
                }
                for token in split_tags(tags) {
                    if let Some(label) = canonical_disease(token) {
                        labels.insert(label.to_string());
                    }
                }
            }
        }

        if labels.is_empty() {
            DEFAULT_DISEASE_OPTIONS.iter().map(|s| s.to_string()).collect()
        } else {
            labels.into_iter().collect()
        }
    }
}

/// Split a tag cell into discrete trimmed tokens on commas and semicolons.
pub fn split_tags(cell: &str) -> impl Iterator<Item = &str> {
    cell.split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

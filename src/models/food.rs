use serde::{Deserialize, Serialize};

/// Coarse food-group classification used to balance meal composition.
///
/// `Other` is the default when no keyword matches and is skipped during
/// composition unless no alternative pool exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Staple,
    Protein,
    Vegetable,
    Fruit,
    Milk,
    Other,
}

impl FoodCategory {
    /// All categories the composer draws from, in display order.
    pub const ALL: [FoodCategory; 6] = [
        FoodCategory::Staple,
        FoodCategory::Protein,
        FoodCategory::Vegetable,
        FoodCategory::Fruit,
        FoodCategory::Milk,
        FoodCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FoodCategory::Staple => "staple",
            FoodCategory::Protein => "protein",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Fruit => "fruit",
            FoodCategory::Milk => "milk",
            FoodCategory::Other => "other",
        }
    }
}

/// A food-composition catalog row. Nutrients are per 100 g reference portion.
///
/// Nutrient fields are non-negative; unparseable source cells are coerced to
/// 0.0 at ingestion so downstream arithmetic is always defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,

    /// Raw food-group text from the catalog (classification input).
    #[serde(default)]
    pub group: String,

    pub category: FoodCategory,

    pub energy_kcal: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carb_g: f64,

    /// Raw halal marker text, when the catalog carries the column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halal: Option<String>,

    /// Comma/semicolon-delimited allergy tag text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergy_tags: Option<String>,

    /// Comma/semicolon-delimited disease restriction text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_tags: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium_mg: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar_g: Option<f64>,
}

impl FoodItem {
    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Nutrient values scaled from the 100 g reference to `portion_g` grams.
    pub fn scaled(&self, portion_g: f64) -> (f64, f64, f64, f64) {
        let ratio = portion_g / 100.0;
        (
            self.energy_kcal * ratio,
            self.protein_g * ratio,
            self.fat_g * ratio,
            self.carb_g * ratio,
        )
    }

    /// Basic validation: non-negative nutrient values.
    pub fn is_valid(&self) -> bool {
        self.energy_kcal >= 0.0
            && self.protein_g >= 0.0
            && self.fat_g >= 0.0
            && self.carb_g >= 0.0
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: {} kcal, P:{} F:{} C:{}",
            self.name,
            self.category.label(),
            self.energy_kcal,
            self.protein_g,
            self.fat_g,
            self.carb_g
        )
    }
}

impl PartialEq for FoodItem {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Eq for FoodItem {}

impl std::hash::Hash for FoodItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.to_lowercase().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> FoodItem {
        FoodItem {
            name: "Nasi putih".to_string(),
            group: "Serealia".to_string(),
            category: FoodCategory::Staple,
            energy_kcal: 180.0,
            protein_g: 3.0,
            fat_g: 0.3,
            carb_g: 39.8,
            halal: Some("halal".to_string()),
            allergy_tags: None,
            disease_tags: None,
            sodium_mg: Some(1.0),
            sugar_g: Some(0.1),
        }
    }

    #[test]
    fn test_scaled_portion() {
        let item = sample_item();
        let (kcal, p, f, c) = item.scaled(250.0);
        assert!((kcal - 450.0).abs() < 1e-9);
        assert!((p - 7.5).abs() < 1e-9);
        assert!((f - 0.75).abs() < 1e-9);
        assert!((c - 99.5).abs() < 1e-9);
    }

    #[test]
    fn test_is_valid() {
        let item = sample_item();
        assert!(item.is_valid());

        let mut invalid = sample_item();
        invalid.protein_g = -1.0;
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_equality_case_insensitive() {
        let item1 = sample_item();
        let mut item2 = sample_item();
        item2.name = "NASI PUTIH".to_string();
        assert_eq!(item1, item2);
    }
}

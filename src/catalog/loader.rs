use std::path::Path;

use tracing::debug;

use crate::catalog::classify::classify;
use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::FoodItem;

/// Resolved column indices for the semantic fields of a raw catalog file.
///
/// Source catalogs do not use canonical headers; each field is located by a
/// keyword scan over the header row. First matching header wins per field.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub group: Option<usize>,
    pub energy: Option<usize>,
    pub protein: Option<usize>,
    pub fat: Option<usize>,
    pub carb: Option<usize>,
    pub halal: Option<usize>,
    pub allergy: Option<usize>,
    pub disease: Option<usize>,
    pub sodium: Option<usize>,
    pub sugar: Option<usize>,
}

impl ColumnMap {
    /// Resolve semantic fields from a raw header row.
    pub fn from_headers(headers: &[String]) -> Self {
        let mut map = ColumnMap::default();

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_uppercase();

            let slot = if contains_any(&h, &["ENERGI", "ENERGY", "KALORI", "CALORIE"]) {
                &mut map.energy
            } else if h.contains("PROTEIN") {
                &mut map.protein
            } else if contains_any(&h, &["LEMAK", "FAT"]) {
                &mut map.fat
            } else if contains_any(&h, &["KH", "KARBO", "CARB", "ARANG"]) {
                &mut map.carb
            } else if contains_any(&h, &["NATRIUM", "SODIUM"]) {
                &mut map.sodium
            } else if contains_any(&h, &["GULA", "SUGAR"]) {
                &mut map.sugar
            } else if contains_any(&h, &["NAMA", "BAHAN", "FOOD", "NAME"]) {
                &mut map.name
            } else if contains_any(&h, &["GOLONGAN", "KELOMPOK", "GROUP"]) {
                &mut map.group
            } else if contains_any(&h, &["HALAL", "STATUS"]) {
                &mut map.halal
            } else if contains_any(&h, &["ALERGI", "ALLERGY"]) {
                &mut map.allergy
            } else if contains_any(&h, &["PENYAKIT", "PANTANGAN", "DISEASE"]) {
                &mut map.disease
            } else {
                continue;
            };

            if slot.is_none() {
                *slot = Some(idx);
            }
        }

        map
    }

    /// A catalog is unusable without at least a name and an energy column.
    pub fn is_usable(&self) -> bool {
        self.name.is_some() && self.energy.is_some()
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Parse a numeric cell, accepting comma decimal separators.
///
/// Unparseable or missing values coerce to 0.0 so nutrient arithmetic is
/// always defined downstream.
fn parse_numeric(cell: Option<&str>) -> f64 {
    cell.map(|v| v.trim().replace(',', "."))
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

fn non_empty(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Strip preparation suffixes from a catalog food name.
fn clean_name(raw: &str) -> String {
    let mut name = raw.trim().to_string();
    for suffix in [", mentah", " mentah", ", segar", " segar", ", kering", " kering"] {
        if let Some(stripped) = strip_suffix_ci(&name, suffix) {
            name = stripped;
        }
    }
    name.trim().trim_end_matches(',').to_string()
}

fn strip_suffix_ci(s: &str, suffix: &str) -> Option<String> {
    let lower = s.to_lowercase();
    let cut = s.len().checked_sub(suffix.len())?;
    if lower.ends_with(&suffix.to_lowercase()) && s.is_char_boundary(cut) {
        Some(s[..cut].to_string())
    } else {
        None
    }
}

/// Load a catalog from a CSV file with free-form headers.
///
/// Rows without a name are skipped; duplicate names keep the last
/// occurrence. Every surviving row gets a category assigned at ingestion.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PlanError::CatalogUnavailable(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let map = ColumnMap::from_headers(&headers);
    if !map.is_usable() {
        return Err(PlanError::InvalidInput(format!(
            "no name/energy columns recognized in headers: {}",
            headers.join(", ")
        )));
    }
    debug!(?map, "resolved catalog columns");

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i));

        let Some(raw_name) = non_empty(cell(map.name)) else {
            continue;
        };
        let name = clean_name(&raw_name);
        if name.is_empty() {
            continue;
        }

        let group = non_empty(cell(map.group)).unwrap_or_default();
        let category = classify(&name, &group);

        items.push(FoodItem {
            name,
            group,
            category,
            energy_kcal: parse_numeric(cell(map.energy)),
            protein_g: parse_numeric(cell(map.protein)),
            fat_g: parse_numeric(cell(map.fat)),
            carb_g: parse_numeric(cell(map.carb)),
            halal: non_empty(cell(map.halal)),
            allergy_tags: non_empty(cell(map.allergy)),
            disease_tags: non_empty(cell(map.disease)),
            sodium_mg: map.sodium.map(|i| parse_numeric(record.get(i))),
            sugar_g: map.sugar.map(|i| parse_numeric(record.get(i))),
        });
    }

    if items.is_empty() {
        return Err(PlanError::CatalogEmpty);
    }

    Ok(Catalog::new(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::models::FoodCategory;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_header_normalization() {
        let headers: Vec<String> = ["NAMA BAHAN", "ENERGI (kkal)", "PROTEIN (g)", "LEMAK", "KH"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = ColumnMap::from_headers(&headers);

        assert_eq!(map.name, Some(0));
        assert_eq!(map.energy, Some(1));
        assert_eq!(map.protein, Some(2));
        assert_eq!(map.fat, Some(3));
        assert_eq!(map.carb, Some(4));
        assert!(map.is_usable());
    }

    #[test]
    fn test_first_matching_header_wins() {
        let headers: Vec<String> = ["NAMA", "ENERGY", "KALORI"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = ColumnMap::from_headers(&headers);
        assert_eq!(map.energy, Some(1));
    }

    #[test]
    fn test_load_coerces_bad_numbers_to_zero() {
        let file = write_csv(
            "NAMA,ENERGI,PROTEIN,LEMAK,KARBO\n\
             Nasi putih,180,\"3,0\",n/a,39.8\n",
        );
        let catalog = load_catalog(file.path()).unwrap();
        let item = catalog.items().first().unwrap();

        assert_eq!(item.name, "Nasi putih");
        assert!((item.energy_kcal - 180.0).abs() < 1e-9);
        assert!((item.protein_g - 3.0).abs() < 1e-9); // comma decimal accepted
        assert_eq!(item.fat_g, 0.0); // unparseable -> 0
        assert!(item.is_valid());
    }

    #[test]
    fn test_load_classifies_and_cleans_names() {
        let file = write_csv(
            "NAMA,ENERGI,PROTEIN,LEMAK,KARBO\n\
             \"Bayam, segar\",23,2.9,0.4,3.6\n",
        );
        let catalog = load_catalog(file.path()).unwrap();
        let item = catalog.items().first().unwrap();

        assert_eq!(item.name, "Bayam");
        assert_eq!(item.category, FoodCategory::Vegetable);
    }

    #[test]
    fn test_missing_catalog_file() {
        let err = load_catalog("/nonexistent/catalog.csv").unwrap_err();
        assert!(matches!(err, PlanError::CatalogUnavailable(_)));
    }

    #[test]
    fn test_unrecognized_headers_rejected() {
        let file = write_csv("A,B,C\n1,2,3\n");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }
}

use crate::models::FoodCategory;

/// Condiments, oils, and seasonings that keyword lists would misfile as
/// staples or proteins. Checked before any positive match.
const BLACKLIST: &[&str] = &[
    "gula", "minyak", "tepung bumbu", "kerupuk", "sambal", "kecap", "bumbu",
];

const STAPLE_KEYWORDS: &[&str] = &[
    "beras", "nasi", "jagung", "ubi", "singkong", "kentang", "roti", "mie", "bihun", "havermut",
    "oat", "biskuit", "talas", "sagu", "ketan", "rice", "bread", "noodle", "potato",
];

const VEGETABLE_KEYWORDS: &[&str] = &[
    "bayam", "kangkung", "sawi", "wortel", "buncis", "kacang panjang", "daun", "tomat", "timun",
    "labu", "terong", "kol", "brokoli", "sayur", "pare", "selada", "jamur", "petai", "oyong",
    "tauge", "kecambah", "rebung", "spinach", "carrot", "vegetable",
];

const FRUIT_KEYWORDS: &[&str] = &[
    "apel", "jeruk", "pisang", "mangga", "pepaya", "semangka", "melon", "nanas", "anggur",
    "salak", "rambutan", "lengkeng", "durian", "buah", "jambu", "alpukat", "belimbing",
    "strawberry", "pir", "kurma", "apple", "banana", "orange", "fruit",
];

/// Dairy is matched before the protein list so that milk products do not
/// land in the protein pool via the "susu" keyword.
const MILK_KEYWORDS: &[&str] = &["susu", "keju", "yogurt", "milk", "cheese"];

const PROTEIN_KEYWORDS: &[&str] = &[
    "ayam", "daging", "sapi", "kambing", "ikan", "telur", "bebek", "udang", "cumi", "kerang",
    "kepiting", "tahu", "tempe", "kedelai", "kacang", "oncom", "sarden", "kornet", "bakso",
    "sosis", "abon", "hati", "ampela", "tongkol", "mujair", "lele", "chicken", "beef", "fish",
    "egg",
];

/// Classify a catalog row by keyword scan over its name and group text.
pub fn classify(name: &str, group: &str) -> FoodCategory {
    let txt = format!("{} {}", name.to_lowercase(), group.to_lowercase());

    if BLACKLIST.iter().any(|k| txt.contains(k)) {
        return FoodCategory::Other;
    }
    if STAPLE_KEYWORDS.iter().any(|k| txt.contains(k)) {
        return FoodCategory::Staple;
    }
    if VEGETABLE_KEYWORDS.iter().any(|k| txt.contains(k)) {
        return FoodCategory::Vegetable;
    }
    if FRUIT_KEYWORDS.iter().any(|k| txt.contains(k)) {
        return FoodCategory::Fruit;
    }
    if MILK_KEYWORDS.iter().any(|k| txt.contains(k)) {
        return FoodCategory::Milk;
    }
    if PROTEIN_KEYWORDS.iter().any(|k| txt.contains(k)) {
        return FoodCategory::Protein;
    }

    FoodCategory::Other
}

/// Map a free-text allergy token to its canonical label, if known.
///
/// Keeps "almond" from matching inside unrelated words: the caller compares
/// canonical labels, never raw substrings of the user token.
pub fn canonical_allergy(token: &str) -> Option<&'static str> {
    const MAP: &[(&str, &str)] = &[
        ("udang", "Seafood"),
        ("kepiting", "Seafood"),
        ("cumi", "Seafood"),
        ("kerang", "Seafood"),
        ("ikan", "Seafood"),
        ("seafood", "Seafood"),
        ("shrimp", "Seafood"),
        ("telur", "Egg"),
        ("egg", "Egg"),
        ("susu", "Dairy"),
        ("laktosa", "Dairy"),
        ("milk", "Dairy"),
        ("lactose", "Dairy"),
        ("kacang", "Nuts"),
        ("peanut", "Nuts"),
        ("nut", "Nuts"),
        ("gluten", "Gluten"),
        ("tepung", "Gluten"),
        ("wheat", "Gluten"),
    ];

    let t = token.trim().to_lowercase();
    MAP.iter()
        .find(|(keyword, _)| t.contains(keyword))
        .map(|(_, label)| *label)
}

/// Map a free-text disease token to its canonical label, if known.
pub fn canonical_disease(token: &str) -> Option<&'static str> {
    const MAP: &[(&str, &str)] = &[
        ("diabetes", "Diabetes"),
        ("kencing manis", "Diabetes"),
        ("gula darah", "Diabetes"),
        ("hiperglikemia", "Diabetes"),
        ("hipertensi", "Hypertension"),
        ("darah tinggi", "Hypertension"),
        ("tensi", "Hypertension"),
        ("hypertension", "Hypertension"),
        ("jantung", "Heart disease"),
        ("heart", "Heart disease"),
        ("kolesterol", "Dyslipidemia"),
        ("lemak darah", "Dyslipidemia"),
        ("cholesterol", "Dyslipidemia"),
        ("ginjal", "Chronic kidney disease"),
        ("kidney", "Chronic kidney disease"),
        ("asam urat", "Gout"),
        ("gout", "Gout"),
        ("maag", "Dyspepsia"),
        ("gerd", "Dyspepsia"),
        ("lambung", "Dyspepsia"),
    ];

    let t = token.trim().to_lowercase();
    MAP.iter()
        .find(|(keyword, _)| t.contains(keyword))
        .map(|(_, label)| *label)
}

/// Default option lists shown when the catalog carries no tag columns.
pub const DEFAULT_ALLERGY_OPTIONS: &[&str] = &["Seafood", "Egg", "Dairy", "Nuts", "Gluten"];
pub const DEFAULT_DISEASE_OPTIONS: &[&str] = &[
    "Diabetes",
    "Hypertension",
    "Dyslipidemia",
    "Gout",
    "Chronic kidney disease",
    "Dyspepsia",
];

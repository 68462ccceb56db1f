/// Number of meal slots a daily energy target is divided across.
pub const MEALS_PER_DAY: f64 = 3.0;

/// Calorie-split heuristic for macro gram targets: fraction of target
/// calories sourced from each macro.
pub const CARB_CALORIE_SHARE: f64 = 0.5;
pub const PROTEIN_CALORIE_SHARE: f64 = 0.2;
pub const FAT_CALORIE_SHARE: f64 = 0.3;

/// Energy content per gram of macro (Atwater factors).
pub const KCAL_PER_G_CARB: f64 = 4.0;
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Deviation-score weights. Energy deviation dominates, then protein.
pub const ENERGY_DEV_WEIGHT: f64 = 0.4;
pub const PROTEIN_DEV_WEIGHT: f64 = 0.3;
pub const FAT_DEV_WEIGHT: f64 = 0.2;
pub const CARB_DEV_WEIGHT: f64 = 0.1;

/// Guard against division by zero in relative deviations.
pub const EPSILON: f64 = 1e-9;

/// Ensemble combination weights for the primary/secondary regressors.
pub const PRIMARY_WEIGHT: f64 = 0.5;
pub const SECONDARY_WEIGHT: f64 = 0.5;

/// Hard dietary thresholds applied when the catalog carries the fields.
pub const HYPERTENSION_SODIUM_LIMIT_MG: f64 = 800.0;
pub const DIABETES_SUGAR_LIMIT_G: f64 = 15.0;

/// Best-ranked slice kept per category pool during composition.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Portion bounds in grams, applied per item after scaling the 100 g
/// reference portion.
pub const MIN_PORTION_G: f64 = 30.0;
pub const MAX_PORTION_G: f64 = 400.0;

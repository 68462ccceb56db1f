pub mod composer;
pub mod constants;
pub mod filter;
pub mod ranking;
pub mod scoring;

pub use composer::{compose, ComposerConfig, SelectionStrategy};
pub use filter::{filter, FilterOptions, FilterOutcome};
pub use ranking::{rank, RankOutcome};
pub use scoring::{score, MacroTargets, ScoredFood};

use tracing::info;

use crate::catalog::Catalog;
use crate::ensemble::ModelBundle;
use crate::error::Result;
use crate::models::{DayPlan, UserPreferences};

/// Full pipeline output: the plan plus run diagnostics.
#[derive(Debug)]
pub struct PlanOutput {
    pub days: Vec<DayPlan>,
    /// Candidates surviving the constraint filter.
    pub candidate_count: usize,
    /// True when ranking fell back to the rule score.
    pub degraded: bool,
}

/// Run the whole pipeline: filter, score, rank, compose.
///
/// The catalog and model bundle are read-only; each stage produces a fresh
/// derived collection, so concurrent planning requests can share both.
pub fn generate_plan(
    catalog: &Catalog,
    preferences: &UserPreferences,
    filter_options: &FilterOptions,
    bundle: Option<&ModelBundle>,
    composer_config: &ComposerConfig,
) -> Result<PlanOutput> {
    let outcome = filter::filter(catalog, preferences, filter_options)?;
    let candidate_count = outcome.candidates.len();

    let scored = scoring::score(outcome.candidates, preferences.energy_target_kcal);
    let ranked = ranking::rank(scored, bundle);
    let days = composer::compose(
        &ranked.ranked,
        preferences.energy_target_kcal,
        preferences.plan_days,
        composer_config,
    );

    info!(
        candidates = candidate_count,
        days = days.len(),
        degraded = ranked.degraded,
        "plan generated"
    );

    Ok(PlanOutput {
        days,
        candidate_count,
        degraded: ranked.degraded,
    })
}

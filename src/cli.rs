use clap::{Args, Parser, Subcommand};

use crate::pipeline::constants::DEFAULT_POOL_SIZE;

/// NutriPlan: meal planning from a food-composition catalog.
#[derive(Parser, Debug)]
#[command(name = "nutriplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food-composition catalog CSV.
    #[arg(short, long, default_value = "catalog.csv")]
    pub catalog: String,

    /// Path to the trained model bundle JSON. Ranking falls back to the
    /// rule score when absent or unreadable.
    #[arg(short, long)]
    pub models: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a multi-day meal plan.
    Plan(PlanArgs),

    /// Show the ranked candidate table without composing meals.
    Candidates {
        /// Number of top candidates to display.
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Daily energy target in kcal used for the deviation targets.
        #[arg(long, default_value_t = 2100.0)]
        target_kcal: f64,
    },

    /// Show catalog statistics and the extracted tag vocabulary.
    CatalogInfo,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan(PlanArgs::default())
    }
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Number of days to plan. Prompted when omitted.
    #[arg(long)]
    pub days: Option<u32>,

    /// Daily energy target in kcal. Skips the profile prompts when given.
    #[arg(long)]
    pub target_kcal: Option<f64>,

    /// Require halal items.
    #[arg(long)]
    pub halal: bool,

    /// Keep items with no halal metadata when --halal is set.
    #[arg(long)]
    pub halal_unknown_ok: bool,

    /// Allergy tokens, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub allergies: Vec<String>,

    /// Disease tokens, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub diseases: Vec<String>,

    /// Seed for randomized item selection. Deterministic rotation when
    /// omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Best-ranked items kept per category pool.
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: usize,

    /// Print the plan as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

impl Default for PlanArgs {
    fn default() -> Self {
        Self {
            days: None,
            target_kcal: None,
            halal: false,
            halal_unknown_ok: false,
            allergies: Vec::new(),
            diseases: Vec::new(),
            seed: None,
            pool_size: DEFAULT_POOL_SIZE,
            json: false,
        }
    }
}

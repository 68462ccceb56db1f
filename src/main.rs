use clap::Parser;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use nutriplan_rs::catalog::{load_catalog, Catalog};
use nutriplan_rs::cli::{Cli, Command, PlanArgs};
use nutriplan_rs::ensemble::{load_bundle, ModelBundle};
use nutriplan_rs::error::Result;
use nutriplan_rs::interface::{
    display_candidates, display_catalog_info, display_energy_summary, display_plan,
    prompt_constraints, prompt_plan_days, prompt_profile,
};
use nutriplan_rs::models::UserPreferences;
use nutriplan_rs::nutrition::{bmi_and_category, daily_energy_target, mifflin_st_jeor};
use nutriplan_rs::pipeline::{
    self, filter, rank, score, ComposerConfig, FilterOptions, SelectionStrategy,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let catalog = load_catalog(&cli.catalog)?;
    let bundle = cli.models.as_deref().and_then(load_bundle_or_warn);

    match command {
        Command::Plan(args) => cmd_plan(&catalog, bundle.as_ref(), &args),
        Command::Candidates { limit, target_kcal } => {
            cmd_candidates(&catalog, bundle.as_ref(), limit, target_kcal)
        }
        Command::CatalogInfo => {
            display_catalog_info(&catalog);
            Ok(())
        }
    }
}

/// A missing or malformed bundle downgrades ranking, it does not abort.
fn load_bundle_or_warn(path: &str) -> Option<ModelBundle> {
    match load_bundle(path) {
        Ok(bundle) => Some(bundle),
        Err(e) => {
            warn!(path, error = %e, "could not load model bundle, using rule score");
            None
        }
    }
}

/// Generate and display a multi-day meal plan.
fn cmd_plan(catalog: &Catalog, bundle: Option<&ModelBundle>, args: &PlanArgs) -> Result<()> {
    println!("Loaded {} catalog items", catalog.len());

    // Headless when a target is given; interactive prompts otherwise.
    let energy_target_kcal = match args.target_kcal {
        Some(target) => target,
        None => {
            let profile = prompt_profile()?;
            let bmr = mifflin_st_jeor(
                profile.sex,
                profile.weight_kg,
                profile.height_cm,
                profile.age_years,
            );
            let target = daily_energy_target(&profile);
            let (bmi, bmi_cat) = bmi_and_category(profile.weight_kg, profile.height_cm);
            display_energy_summary(bmr, target, bmi, bmi_cat);
            target
        }
    };

    let (halal_required, allergies, diseases) =
        if args.halal || !args.allergies.is_empty() || !args.diseases.is_empty() {
            (args.halal, args.allergies.clone(), args.diseases.clone())
        } else if args.target_kcal.is_some() {
            // Headless run with no constraint flags
            (false, Vec::new(), Vec::new())
        } else {
            prompt_constraints(catalog)?
        };

    let plan_days = match args.days {
        Some(days) if days >= 1 => days,
        Some(_) => {
            return Err(nutriplan_rs::PlanError::InvalidInput(
                "plan at least one day".to_string(),
            ))
        }
        None if args.target_kcal.is_some() => 3,
        None => prompt_plan_days()?,
    };

    let preferences = UserPreferences {
        halal_required,
        allergies,
        diseases,
        energy_target_kcal,
        plan_days,
    };
    let filter_options = FilterOptions {
        missing_halal_passes: args.halal_unknown_ok,
    };
    let composer_config = ComposerConfig {
        pool_size: args.pool_size,
        strategy: match args.seed {
            Some(seed) => SelectionStrategy::Seeded(seed),
            None => SelectionStrategy::Rotating,
        },
    };

    let output = pipeline::generate_plan(
        catalog,
        &preferences,
        &filter_options,
        bundle,
        &composer_config,
    )?;

    println!(
        "{} candidates after filtering{}",
        output.candidate_count,
        if output.degraded {
            " (rule-score ranking)"
        } else {
            ""
        }
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output.days)?);
    } else {
        display_plan(&output.days, energy_target_kcal);
    }

    Ok(())
}

/// Show the ranked candidate table without composing meals.
fn cmd_candidates(
    catalog: &Catalog,
    bundle: Option<&ModelBundle>,
    limit: usize,
    target: f64,
) -> Result<()> {
    let (halal_required, allergies, diseases) = prompt_constraints(catalog)?;

    let preferences = UserPreferences {
        halal_required,
        allergies,
        diseases,
        energy_target_kcal: target,
        plan_days: 1,
    };

    let outcome = filter(catalog, &preferences, &FilterOptions::default())?;
    println!(
        "{} candidates (removed: {} halal, {} allergy, {} disease)",
        outcome.candidates.len(),
        outcome.removed_halal,
        outcome.removed_allergy,
        outcome.removed_disease
    );

    let ranked = rank(score(outcome.candidates, target), bundle);
    display_candidates(&ranked.ranked, limit);

    Ok(())
}

use dialoguer::{Confirm, Input, MultiSelect, Select};
use strsim::jaro_winkler;

use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::{ActivityLevel, Goal, Profile, Sex};

fn prompt_number<T: std::str::FromStr>(prompt: &str, default: &str) -> Result<T> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("invalid number: {input}")))
}

/// Collect the physiological profile used to size the energy target.
pub fn prompt_profile() -> Result<Profile> {
    let sex = match Select::new()
        .with_prompt("Sex")
        .items(&["Male", "Female"])
        .default(0)
        .interact()?
    {
        0 => Sex::Male,
        _ => Sex::Female,
    };

    let age_years: u32 = prompt_number("Age (years)", "25")?;
    let weight_kg: f64 = prompt_number("Weight (kg)", "60")?;
    let height_cm: f64 = prompt_number("Height (cm)", "170")?;

    let activity = match Select::new()
        .with_prompt("Activity level")
        .items(&[
            "Sedentary (desk work)",
            "Light (light daily activity)",
            "Moderate (exercise several times a week)",
            "Heavy (hard daily exercise)",
            "Very heavy (athlete / manual labor)",
        ])
        .default(2)
        .interact()?
    {
        0 => ActivityLevel::Sedentary,
        1 => ActivityLevel::Light,
        2 => ActivityLevel::Moderate,
        3 => ActivityLevel::Heavy,
        _ => ActivityLevel::VeryHeavy,
    };

    let goal = match Select::new()
        .with_prompt("Goal")
        .items(&["Lose weight", "Maintain", "Gain weight"])
        .default(1)
        .interact()?
    {
        0 => Goal::Cut,
        2 => Goal::Bulk,
        _ => Goal::Maintain,
    };

    Ok(Profile {
        sex,
        age_years,
        weight_kg,
        height_cm,
        activity,
        goal,
    })
}

pub fn prompt_plan_days() -> Result<u32> {
    let days: u32 = prompt_number("How many days to plan?", "3")?;
    if days == 0 {
        return Err(PlanError::InvalidInput("plan at least one day".to_string()));
    }
    Ok(days)
}

pub fn prompt_halal_required() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Restrict to halal items?")
        .default(false)
        .interact()?)
}

/// Pick constraint tokens from the catalog vocabulary, then accept extra
/// free-text tokens with fuzzy matching against the known options.
pub fn prompt_constraint_tokens(label: &str, options: &[String]) -> Result<Vec<String>> {
    let mut tokens: Vec<String> = Vec::new();

    if !options.is_empty() {
        let picked = MultiSelect::new()
            .with_prompt(format!("{label} (space to toggle, enter to confirm)"))
            .items(options)
            .interact()?;
        tokens.extend(picked.into_iter().map(|i| options[i].clone()));
    }

    loop {
        let input: String = Input::new()
            .with_prompt(format!("Other {label} (or press Enter to finish)"))
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        // Exact match against the vocabulary first
        if let Some(option) = options
            .iter()
            .find(|o| o.to_lowercase() == input.to_lowercase())
        {
            if !tokens.contains(option) {
                tokens.push(option.clone());
                println!("Added: {option}");
            }
            continue;
        }

        // Fuzzy match, then fall back to the raw token
        let best = options
            .iter()
            .map(|o| (o, jaro_winkler(&o.to_lowercase(), &input.to_lowercase())))
            .filter(|(_, score)| *score > 0.7)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        match best {
            Some((option, _)) => {
                let confirm = Confirm::new()
                    .with_prompt(format!("Did you mean '{option}'?"))
                    .default(true)
                    .interact()?;
                let token = if confirm {
                    option.clone()
                } else {
                    input.to_string()
                };
                if !tokens.contains(&token) {
                    println!("Added: {token}");
                    tokens.push(token);
                }
            }
            None => {
                let token = input.to_string();
                if !tokens.contains(&token) {
                    println!("Added: {token}");
                    tokens.push(token);
                }
            }
        }
    }

    Ok(tokens)
}

/// Collect halal, allergy, and disease constraints using the catalog's
/// extracted tag vocabulary for the option lists.
pub fn prompt_constraints(catalog: &Catalog) -> Result<(bool, Vec<String>, Vec<String>)> {
    let halal_required = prompt_halal_required()?;
    let allergies = prompt_constraint_tokens("allergies", &catalog.allergy_options())?;
    let diseases = prompt_constraint_tokens("health conditions", &catalog.disease_options())?;
    Ok((halal_required, allergies, diseases))
}

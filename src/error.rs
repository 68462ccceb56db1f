use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Catalog not found: {0}")]
    CatalogUnavailable(String),

    #[error("Catalog contains no usable rows")]
    CatalogEmpty,

    #[error(
        "No candidates left after filtering (removed: {removed_halal} halal, \
         {removed_allergy} allergy, {removed_disease} disease)"
    )]
    NoCandidates {
        removed_halal: usize,
        removed_allergy: usize,
        removed_disease: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;

pub mod history;
pub mod markdown;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod service;

pub use history::recent_recipe_names;
pub use service::{RecipeConfig, RecipeService};

use crate::ai::LlmError;
use crate::error::CoreError;

#[derive(thiserror::Error, Debug)]
pub enum RecipeError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("llm error: {0}")]
    Llm(#[from] LlmError),
    #[error("cannot parse llm response: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no ranked crops to cook with")]
    NoIngredients,
}

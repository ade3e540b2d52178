// Copyright 2023 Remi Bernotavicius

//! Recipes written by an external generator. The generator is asked for a recipe in JSON, and a
//! recipe is only stored once the whole response checks out.

use crate::database;
use crate::database::models::{NewRecipe, Recipe};
use crate::error::Result;
use crate::store;
use serde::Deserialize;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generator failed: {0}")]
    Generator(#[source] BoxError),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid response: {0}")]
    Invalid(String),
}

/// Something that turns a prompt into the raw text of a recipe.
pub trait RecipeGenerator {
    fn generate(&self, prompt: &str) -> std::result::Result<String, BoxError>;
}

impl<F> RecipeGenerator for F
where
    F: Fn(&str) -> std::result::Result<String, BoxError>,
{
    fn generate(&self, prompt: &str) -> std::result::Result<String, BoxError> {
        self(prompt)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GeneratedRecipe {
    pub title: String,
    pub instructions: String,
    pub prep_minutes: i32,
}

/// Same as for recipes written by hand.
const MAX_TITLE_LENGTH: usize = 100;

pub fn parse_response(raw: &str) -> std::result::Result<GeneratedRecipe, GenerationError> {
    let recipe: GeneratedRecipe = serde_json::from_str(raw)?;
    if recipe.title.trim().is_empty() {
        return Err(GenerationError::Invalid("title is blank".into()));
    }
    let title_len = recipe.title.chars().count();
    if title_len > MAX_TITLE_LENGTH {
        return Err(GenerationError::Invalid(format!(
            "title is {title_len} characters long, the limit is {MAX_TITLE_LENGTH}"
        )));
    }
    if recipe.instructions.trim().is_empty() {
        return Err(GenerationError::Invalid("instructions are blank".into()));
    }
    if recipe.prep_minutes < 0 {
        return Err(GenerationError::Invalid(format!(
            "negative preparation time {}",
            recipe.prep_minutes
        )));
    }
    Ok(recipe)
}

/// Asks `generator` for a recipe and stores it, remembering the prompt.
pub fn create_generated_recipe(
    conn: &mut database::Connection,
    generator: &impl RecipeGenerator,
    prompt: &str,
) -> Result<Recipe> {
    let raw = generator.generate(prompt).map_err(|e| {
        log::warn!("recipe generator failed for prompt {prompt:?}: {e}");
        GenerationError::Generator(e)
    })?;
    store_generated_recipe(conn, prompt, &raw)
}

/// Stores a response the generator already produced for `prompt`.
pub fn store_generated_recipe(
    conn: &mut database::Connection,
    prompt: &str,
    raw: &str,
) -> Result<Recipe> {
    let generated = parse_response(raw).inspect_err(|e| {
        log::warn!("discarding generated recipe: {e}");
    })?;
    let recipe = store::in_transaction(conn, |conn| {
        store::insert_recipe(
            conn,
            &NewRecipe {
                title: &generated.title,
                instructions: &generated.instructions,
                prep_minutes: generated.prep_minutes,
                generation_prompt: Some(prompt),
                is_ai_generated: true,
            },
        )
    })?;
    log::info!("stored generated recipe {} {:?}", recipe.id, recipe.title);
    Ok(recipe)
}

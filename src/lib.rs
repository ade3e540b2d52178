// Copyright 2023 Remi Bernotavicius

//! Storage for a diet planner: users and their profiles, ingredients and recipes, meals, diets,
//! schedules, and shopping lists, kept in SQLite with their delete rules enforced.

pub mod config;
pub mod database;
pub mod error;
pub mod generation;
pub mod store;

pub use error::{Error, Result};

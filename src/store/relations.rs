// Copyright 2023 Remi Bernotavicius

//! Every foreign key in the schema and what happens to the referencing row when the row it points
//! at is deleted. The migrations declare the same actions in SQLite; the test at the bottom keeps
//! the two in agreement.

use crate::database;
use crate::error::Result;
use derive_more::Display;
use diesel::sql_types::Integer;
use diesel::RunQueryDsl as _;
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Display, EnumIter, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Table {
    #[display("profile")]
    Profiles,
    #[display("dietary restriction")]
    DietaryRestrictions,
    #[display("category")]
    Categories,
    #[display("ingredient")]
    Ingredients,
    #[display("recipe")]
    Recipes,
    #[display("shopping list")]
    ShoppingLists,
    #[display("user")]
    Users,
    #[display("food schedule")]
    FoodSchedules,
    #[display("diet")]
    Diets,
    #[display("meal")]
    Meals,
    #[display("recipe ingredient")]
    IngredientRecipes,
    #[display("meal recipe")]
    RecipeMeals,
    #[display("meal diet")]
    MealDiets,
    #[display("meal schedule entry")]
    MealSchedules,
    #[display("restricted diet ingredient")]
    IngredientDiets,
    #[display("user restriction")]
    UserRestrictions,
    #[display("shopping list item")]
    IngredientShoppingLists,
}

impl Table {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }

    /// The SQL table name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::DietaryRestrictions => "dietary_restrictions",
            Self::Categories => "categories",
            Self::Ingredients => "ingredients",
            Self::Recipes => "recipes",
            Self::ShoppingLists => "shopping_lists",
            Self::Users => "users",
            Self::FoodSchedules => "food_schedules",
            Self::Diets => "diets",
            Self::Meals => "meals",
            Self::IngredientRecipes => "ingredient_recipes",
            Self::RecipeMeals => "recipe_meals",
            Self::MealDiets => "meal_diets",
            Self::MealSchedules => "meal_schedules",
            Self::IngredientDiets => "ingredient_diets",
            Self::UserRestrictions => "user_restrictions",
            Self::IngredientShoppingLists => "ingredient_shopping_lists",
        }
    }

    pub fn contains(&self, conn: &mut database::Connection, id: i32) -> Result<bool> {
        let rows = diesel::sql_query(format!("SELECT id FROM {} WHERE id = ?", self.name()))
            .bind::<Integer, _>(id)
            .load::<RowId>(conn)?;
        Ok(!rows.is_empty())
    }
}

#[derive(diesel::QueryableByName)]
pub(crate) struct RowId {
    #[diesel(sql_type = Integer)]
    pub id: i32,
}

#[derive(Debug, Display, Hash, Copy, Clone, PartialEq, Eq)]
pub enum OnDelete {
    /// The referencing row is deleted too.
    #[display("cascade")]
    Cascade,
    /// The delete fails while any referencing row remains.
    #[display("restrict")]
    Restrict,
    /// The reference is cleared and the referencing row is kept.
    #[display("set null")]
    SetNull,
}

#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq)]
pub struct Relation {
    pub child: Table,
    pub column: &'static str,
    pub parent: Table,
    pub on_delete: OnDelete,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.child.name(), self.column)
    }
}

impl Relation {
    pub(crate) fn referencing_rows(
        &self,
        conn: &mut database::Connection,
        parent_id: i32,
    ) -> Result<Vec<i32>> {
        let query = format!(
            "SELECT id FROM {} WHERE {} = ? ORDER BY id",
            self.child.name(),
            self.column
        );
        Ok(diesel::sql_query(query)
            .bind::<Integer, _>(parent_id)
            .load::<RowId>(conn)?
            .into_iter()
            .map(|r| r.id)
            .collect())
    }

    pub(crate) fn clear_references(
        &self,
        conn: &mut database::Connection,
        parent_id: i32,
    ) -> Result<usize> {
        let query = format!(
            "UPDATE {table} SET {column} = NULL WHERE {column} = ?",
            table = self.child.name(),
            column = self.column
        );
        Ok(diesel::sql_query(query)
            .bind::<Integer, _>(parent_id)
            .execute(conn)?)
    }
}

const fn relation(
    child: Table,
    column: &'static str,
    parent: Table,
    on_delete: OnDelete,
) -> Relation {
    Relation {
        child,
        column,
        parent,
        on_delete,
    }
}

use OnDelete::*;
use Table::*;

pub const RELATIONS: &[Relation] = &[
    relation(Users, "profile_id", Profiles, Cascade),
    relation(Ingredients, "category_id", Categories, SetNull),
    relation(FoodSchedules, "user_id", Users, Cascade),
    relation(Diets, "user_id", Users, Cascade),
    relation(Meals, "user_id", Users, Restrict),
    relation(IngredientRecipes, "ingredient_id", Ingredients, Restrict),
    relation(IngredientRecipes, "recipe_id", Recipes, Restrict),
    relation(RecipeMeals, "recipe_id", Recipes, SetNull),
    relation(RecipeMeals, "meal_id", Meals, SetNull),
    relation(MealDiets, "diet_id", Diets, SetNull),
    relation(MealDiets, "meal_id", Meals, SetNull),
    relation(MealSchedules, "food_schedule_id", FoodSchedules, SetNull),
    relation(MealSchedules, "meal_id", Meals, SetNull),
    relation(IngredientDiets, "ingredient_id", Ingredients, Restrict),
    relation(IngredientDiets, "diet_id", Diets, SetNull),
    relation(UserRestrictions, "restriction_id", DietaryRestrictions, SetNull),
    relation(UserRestrictions, "user_id", Users, SetNull),
    relation(IngredientShoppingLists, "ingredient_id", Ingredients, Restrict),
    relation(IngredientShoppingLists, "shopping_list_id", ShoppingLists, SetNull),
];

/// The relations whose rows point at `parent`.
pub fn referencing(parent: Table) -> impl Iterator<Item = &'static Relation> {
    RELATIONS.iter().filter(move |r| r.parent == parent)
}

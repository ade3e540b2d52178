// Copyright 2023 Remi Bernotavicius

//! The many-to-many links. Each pair can be linked at most once; linking requires both rows to
//! exist, and unlinking reports whether there was anything to remove.

use super::{in_transaction, require};
use crate::database;
use crate::database::models::{
    DietId, DietaryRestriction, DietaryRestrictionId, FoodScheduleId, Ingredient, IngredientDiet,
    IngredientId, IngredientRecipe, IngredientShoppingList, Meal, MealDiet, MealId, MealSchedule,
    Recipe, RecipeId, RecipeMeal, ShoppingListId, UserId, UserRestriction,
};
use crate::database::schema::{
    dietary_restrictions, ingredient_diets, ingredient_recipes, ingredient_shopping_lists,
    ingredients, meal_diets, meal_schedules, meals, recipe_meals, recipes, user_restrictions,
};
use crate::error::Result;
use crate::store::relations::Table;
use diesel::ExpressionMethods as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

// Recipe ingredients

pub fn add_recipe_ingredient(
    conn: &mut database::Connection,
    recipe: RecipeId,
    ingredient: IngredientId,
) -> Result<IngredientRecipe> {
    in_transaction(conn, |conn| {
        require(conn, Table::Recipes, recipe.get())?;
        require(conn, Table::Ingredients, ingredient.get())?;
        let link = diesel::insert_into(ingredient_recipes::table)
            .values((
                ingredient_recipes::ingredient_id.eq(ingredient),
                ingredient_recipes::recipe_id.eq(recipe),
            ))
            .returning(IngredientRecipe::as_returning())
            .get_result(conn)?;
        log::debug!("added ingredient {ingredient} to recipe {recipe}");
        Ok(link)
    })
}

pub fn remove_recipe_ingredient(
    conn: &mut database::Connection,
    recipe: RecipeId,
    ingredient: IngredientId,
) -> Result<bool> {
    in_transaction(conn, |conn| {
        let removed = diesel::delete(
            ingredient_recipes::table
                .filter(ingredient_recipes::recipe_id.eq(recipe))
                .filter(ingredient_recipes::ingredient_id.eq(ingredient)),
        )
        .execute(conn)?;
        Ok(removed > 0)
    })
}

pub fn list_recipe_ingredients(
    conn: &mut database::Connection,
    recipe: RecipeId,
) -> Result<Vec<Ingredient>> {
    require(conn, Table::Recipes, recipe.get())?;
    Ok(ingredient_recipes::table
        .inner_join(ingredients::table)
        .filter(ingredient_recipes::recipe_id.eq(recipe))
        .select(Ingredient::as_select())
        .order(ingredients::name)
        .load(conn)?)
}

pub fn list_ingredient_recipes(
    conn: &mut database::Connection,
    ingredient: IngredientId,
) -> Result<Vec<Recipe>> {
    require(conn, Table::Ingredients, ingredient.get())?;
    Ok(ingredient_recipes::table
        .inner_join(recipes::table)
        .filter(ingredient_recipes::ingredient_id.eq(ingredient))
        .select(Recipe::as_select())
        .order(recipes::title)
        .load(conn)?)
}

/// The sum of the calories of the recipe's ingredients, one serving each.
pub fn recipe_calories(conn: &mut database::Connection, recipe: RecipeId) -> Result<i64> {
    Ok(list_recipe_ingredients(conn, recipe)?
        .iter()
        .map(|i| i64::from(i.calories))
        .sum())
}

// Meal recipes

pub fn add_meal_recipe(
    conn: &mut database::Connection,
    meal: MealId,
    recipe: RecipeId,
) -> Result<RecipeMeal> {
    in_transaction(conn, |conn| {
        require(conn, Table::Meals, meal.get())?;
        require(conn, Table::Recipes, recipe.get())?;
        let link = diesel::insert_into(recipe_meals::table)
            .values((
                recipe_meals::recipe_id.eq(Some(recipe)),
                recipe_meals::meal_id.eq(Some(meal)),
            ))
            .returning(RecipeMeal::as_returning())
            .get_result(conn)?;
        log::debug!("added recipe {recipe} to meal {meal}");
        Ok(link)
    })
}

pub fn remove_meal_recipe(
    conn: &mut database::Connection,
    meal: MealId,
    recipe: RecipeId,
) -> Result<bool> {
    in_transaction(conn, |conn| {
        let removed = diesel::delete(
            recipe_meals::table
                .filter(recipe_meals::meal_id.eq(Some(meal)))
                .filter(recipe_meals::recipe_id.eq(Some(recipe))),
        )
        .execute(conn)?;
        Ok(removed > 0)
    })
}

pub fn list_meal_recipes(conn: &mut database::Connection, meal: MealId) -> Result<Vec<Recipe>> {
    require(conn, Table::Meals, meal.get())?;
    Ok(recipe_meals::table
        .inner_join(recipes::table)
        .filter(recipe_meals::meal_id.eq(Some(meal)))
        .select(Recipe::as_select())
        .order(recipes::title)
        .load(conn)?)
}

/// Every meal-recipe link, including the ones a delete left half empty.
pub fn meal_recipe_rows(conn: &mut database::Connection) -> Result<Vec<RecipeMeal>> {
    Ok(recipe_meals::table
        .select(RecipeMeal::as_select())
        .order(recipe_meals::id)
        .load(conn)?)
}

// Meal diets

pub fn add_meal_diet(
    conn: &mut database::Connection,
    meal: MealId,
    diet: DietId,
) -> Result<MealDiet> {
    in_transaction(conn, |conn| {
        require(conn, Table::Meals, meal.get())?;
        require(conn, Table::Diets, diet.get())?;
        let link = diesel::insert_into(meal_diets::table)
            .values((
                meal_diets::diet_id.eq(Some(diet)),
                meal_diets::meal_id.eq(Some(meal)),
            ))
            .returning(MealDiet::as_returning())
            .get_result(conn)?;
        log::debug!("added meal {meal} to diet {diet}");
        Ok(link)
    })
}

pub fn remove_meal_diet(
    conn: &mut database::Connection,
    meal: MealId,
    diet: DietId,
) -> Result<bool> {
    in_transaction(conn, |conn| {
        let removed = diesel::delete(
            meal_diets::table
                .filter(meal_diets::meal_id.eq(Some(meal)))
                .filter(meal_diets::diet_id.eq(Some(diet))),
        )
        .execute(conn)?;
        Ok(removed > 0)
    })
}

pub fn list_diet_meals(conn: &mut database::Connection, diet: DietId) -> Result<Vec<Meal>> {
    require(conn, Table::Diets, diet.get())?;
    Ok(meal_diets::table
        .inner_join(meals::table)
        .filter(meal_diets::diet_id.eq(Some(diet)))
        .select(Meal::as_select())
        .order((meals::date, meals::id))
        .load(conn)?)
}

pub fn meal_diet_rows(conn: &mut database::Connection) -> Result<Vec<MealDiet>> {
    Ok(meal_diets::table
        .select(MealDiet::as_select())
        .order(meal_diets::id)
        .load(conn)?)
}

// Meal schedules

pub fn add_meal_schedule(
    conn: &mut database::Connection,
    meal: MealId,
    schedule: FoodScheduleId,
) -> Result<MealSchedule> {
    in_transaction(conn, |conn| {
        require(conn, Table::Meals, meal.get())?;
        require(conn, Table::FoodSchedules, schedule.get())?;
        let link = diesel::insert_into(meal_schedules::table)
            .values((
                meal_schedules::food_schedule_id.eq(Some(schedule)),
                meal_schedules::meal_id.eq(Some(meal)),
            ))
            .returning(MealSchedule::as_returning())
            .get_result(conn)?;
        log::debug!("scheduled meal {meal} on food schedule {schedule}");
        Ok(link)
    })
}

pub fn remove_meal_schedule(
    conn: &mut database::Connection,
    meal: MealId,
    schedule: FoodScheduleId,
) -> Result<bool> {
    in_transaction(conn, |conn| {
        let removed = diesel::delete(
            meal_schedules::table
                .filter(meal_schedules::meal_id.eq(Some(meal)))
                .filter(meal_schedules::food_schedule_id.eq(Some(schedule))),
        )
        .execute(conn)?;
        Ok(removed > 0)
    })
}

pub fn list_schedule_meals(
    conn: &mut database::Connection,
    schedule: FoodScheduleId,
) -> Result<Vec<Meal>> {
    require(conn, Table::FoodSchedules, schedule.get())?;
    Ok(meal_schedules::table
        .inner_join(meals::table)
        .filter(meal_schedules::food_schedule_id.eq(Some(schedule)))
        .select(Meal::as_select())
        .order((meals::date, meals::id))
        .load(conn)?)
}

pub fn meal_schedule_rows(conn: &mut database::Connection) -> Result<Vec<MealSchedule>> {
    Ok(meal_schedules::table
        .select(MealSchedule::as_select())
        .order(meal_schedules::id)
        .load(conn)?)
}

// Diet restricted ingredients

pub fn add_diet_restricted_ingredient(
    conn: &mut database::Connection,
    diet: DietId,
    ingredient: IngredientId,
) -> Result<IngredientDiet> {
    in_transaction(conn, |conn| {
        require(conn, Table::Diets, diet.get())?;
        require(conn, Table::Ingredients, ingredient.get())?;
        let link = diesel::insert_into(ingredient_diets::table)
            .values((
                ingredient_diets::ingredient_id.eq(ingredient),
                ingredient_diets::diet_id.eq(Some(diet)),
            ))
            .returning(IngredientDiet::as_returning())
            .get_result(conn)?;
        log::debug!("restricted ingredient {ingredient} in diet {diet}");
        Ok(link)
    })
}

pub fn remove_diet_restricted_ingredient(
    conn: &mut database::Connection,
    diet: DietId,
    ingredient: IngredientId,
) -> Result<bool> {
    in_transaction(conn, |conn| {
        let removed = diesel::delete(
            ingredient_diets::table
                .filter(ingredient_diets::diet_id.eq(Some(diet)))
                .filter(ingredient_diets::ingredient_id.eq(ingredient)),
        )
        .execute(conn)?;
        Ok(removed > 0)
    })
}

pub fn list_diet_restricted_ingredients(
    conn: &mut database::Connection,
    diet: DietId,
) -> Result<Vec<Ingredient>> {
    require(conn, Table::Diets, diet.get())?;
    Ok(ingredient_diets::table
        .inner_join(ingredients::table)
        .filter(ingredient_diets::diet_id.eq(Some(diet)))
        .select(Ingredient::as_select())
        .order(ingredients::name)
        .load(conn)?)
}

pub fn diet_ingredient_rows(conn: &mut database::Connection) -> Result<Vec<IngredientDiet>> {
    Ok(ingredient_diets::table
        .select(IngredientDiet::as_select())
        .order(ingredient_diets::id)
        .load(conn)?)
}

// User restrictions

pub fn add_user_restriction(
    conn: &mut database::Connection,
    user: UserId,
    restriction: DietaryRestrictionId,
) -> Result<UserRestriction> {
    in_transaction(conn, |conn| {
        require(conn, Table::Users, user.get())?;
        require(conn, Table::DietaryRestrictions, restriction.get())?;
        let link = diesel::insert_into(user_restrictions::table)
            .values((
                user_restrictions::restriction_id.eq(Some(restriction)),
                user_restrictions::user_id.eq(Some(user)),
            ))
            .returning(UserRestriction::as_returning())
            .get_result(conn)?;
        log::debug!("added dietary restriction {restriction} to user {user}");
        Ok(link)
    })
}

pub fn remove_user_restriction(
    conn: &mut database::Connection,
    user: UserId,
    restriction: DietaryRestrictionId,
) -> Result<bool> {
    in_transaction(conn, |conn| {
        let removed = diesel::delete(
            user_restrictions::table
                .filter(user_restrictions::user_id.eq(Some(user)))
                .filter(user_restrictions::restriction_id.eq(Some(restriction))),
        )
        .execute(conn)?;
        Ok(removed > 0)
    })
}

pub fn list_user_restrictions(
    conn: &mut database::Connection,
    user: UserId,
) -> Result<Vec<DietaryRestriction>> {
    require(conn, Table::Users, user.get())?;
    Ok(user_restrictions::table
        .inner_join(dietary_restrictions::table)
        .filter(user_restrictions::user_id.eq(Some(user)))
        .select(DietaryRestriction::as_select())
        .order(dietary_restrictions::id)
        .load(conn)?)
}

pub fn user_restriction_rows(conn: &mut database::Connection) -> Result<Vec<UserRestriction>> {
    Ok(user_restrictions::table
        .select(UserRestriction::as_select())
        .order(user_restrictions::id)
        .load(conn)?)
}

// Shopping list items

pub fn add_shopping_list_ingredient(
    conn: &mut database::Connection,
    list: ShoppingListId,
    ingredient: IngredientId,
) -> Result<IngredientShoppingList> {
    in_transaction(conn, |conn| {
        require(conn, Table::ShoppingLists, list.get())?;
        require(conn, Table::Ingredients, ingredient.get())?;
        let link = diesel::insert_into(ingredient_shopping_lists::table)
            .values((
                ingredient_shopping_lists::ingredient_id.eq(ingredient),
                ingredient_shopping_lists::shopping_list_id.eq(Some(list)),
            ))
            .returning(IngredientShoppingList::as_returning())
            .get_result(conn)?;
        log::debug!("added ingredient {ingredient} to shopping list {list}");
        Ok(link)
    })
}

pub fn remove_shopping_list_ingredient(
    conn: &mut database::Connection,
    list: ShoppingListId,
    ingredient: IngredientId,
) -> Result<bool> {
    in_transaction(conn, |conn| {
        let removed = diesel::delete(
            ingredient_shopping_lists::table
                .filter(ingredient_shopping_lists::shopping_list_id.eq(Some(list)))
                .filter(ingredient_shopping_lists::ingredient_id.eq(ingredient)),
        )
        .execute(conn)?;
        Ok(removed > 0)
    })
}

pub fn list_shopping_list_ingredients(
    conn: &mut database::Connection,
    list: ShoppingListId,
) -> Result<Vec<Ingredient>> {
    require(conn, Table::ShoppingLists, list.get())?;
    Ok(ingredient_shopping_lists::table
        .inner_join(ingredients::table)
        .filter(ingredient_shopping_lists::shopping_list_id.eq(Some(list)))
        .select(Ingredient::as_select())
        .order(ingredients::name)
        .load(conn)?)
}

pub fn shopping_list_item_rows(
    conn: &mut database::Connection,
) -> Result<Vec<IngredientShoppingList>> {
    Ok(ingredient_shopping_lists::table
        .select(IngredientShoppingList::as_select())
        .order(ingredient_shopping_lists::id)
        .load(conn)?)
}

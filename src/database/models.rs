// Copyright 2023 Remi Bernotavicius

use crate::database::schema::{
    categories, diets, dietary_restrictions, food_schedules, ingredient_diets, ingredient_recipes,
    ingredient_shopping_lists, ingredients, meal_diets, meal_schedules, meals, profiles,
    recipe_meals, recipes, shopping_lists, user_restrictions, users,
};
use derive_more::Display;
use diesel::associations::{Associations, Identifiable};
use diesel::deserialize::Queryable;
use diesel::expression::Selectable;
use diesel::prelude::{AsChangeset, Insertable};
use diesel_derive_enum::DbEnum;
use diesel_derive_newtype::DieselNewType;
use strum::EnumIter;

macro_rules! id_type {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(
                DieselNewType, Debug, Display, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone,
            )]
            #[display("{_0}")]
            pub struct $name(i32);

            impl $name {
                pub fn new(raw: i32) -> Self {
                    Self(raw)
                }

                pub fn get(self) -> i32 {
                    self.0
                }
            }
        )*
    };
}

id_type!(
    ProfileId,
    DietaryRestrictionId,
    CategoryId,
    IngredientId,
    RecipeId,
    ShoppingListId,
    UserId,
    FoodScheduleId,
    DietId,
    MealId,
    LinkId,
);

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = profiles)]
pub struct Profile {
    pub id: ProfileId,
    pub kind: String,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = profiles)]
pub struct ProfileForm {
    pub kind: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = dietary_restrictions)]
pub struct DietaryRestriction {
    pub id: DietaryRestrictionId,
    pub kind: String,
    pub description: String,
    pub active: bool,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = dietary_restrictions)]
pub struct DietaryRestrictionForm {
    pub kind: String,
    pub description: String,
    pub active: bool,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = categories)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = categories)]
#[diesel(treat_none_as_null = true)]
pub struct CategoryForm {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Associations, Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Category))]
#[diesel(table_name = ingredients)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    /// Calories per serving (e.g. 100g).
    pub calories: i32,
    pub category_id: Option<CategoryId>,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = ingredients)]
#[diesel(treat_none_as_null = true)]
pub struct IngredientForm {
    pub name: String,
    pub calories: i32,
    pub category_id: Option<CategoryId>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = recipes)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub instructions: String,
    pub prep_minutes: i32,
    /// The prompt the recipe was generated from, when it came from the generator.
    pub generation_prompt: Option<String>,
    pub is_ai_generated: bool,
}

/// The user-editable part of a recipe. Where a recipe came from is fixed at insertion.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = recipes)]
pub struct RecipeForm {
    pub title: String,
    pub instructions: String,
    pub prep_minutes: i32,
}

#[derive(Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipe<'a> {
    pub title: &'a str,
    pub instructions: &'a str,
    pub prep_minutes: i32,
    pub generation_prompt: Option<&'a str>,
    pub is_ai_generated: bool,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = shopping_lists)]
pub struct ShoppingList {
    pub id: ShoppingListId,
    pub created_date: chrono::NaiveDate,
    pub active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = shopping_lists)]
pub(crate) struct NewShoppingList {
    pub created_date: chrono::NaiveDate,
    pub active: bool,
}

#[derive(Associations, Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Profile))]
#[diesel(table_name = users)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub date_joined: chrono::NaiveDateTime,
    pub profile_id: ProfileId,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = users)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub profile_id: ProfileId,
}

impl UserForm {
    pub fn new(username: impl Into<String>, profile_id: ProfileId) -> Self {
        Self {
            username: username.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_active: true,
            profile_id,
        }
    }
}

#[derive(Associations, Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = food_schedules)]
pub struct FoodSchedule {
    pub id: FoodScheduleId,
    /// Whether the schedule is mirrored to an external calendar.
    pub is_external_calendar: bool,
    pub active: bool,
    pub user_id: UserId,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = food_schedules)]
pub struct FoodScheduleForm {
    pub is_external_calendar: bool,
    pub active: bool,
}

#[derive(Associations, Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = diets)]
pub struct Diet {
    pub id: DietId,
    pub min_meals: i32,
    pub max_meals: i32,
    pub total_calories: i32,
    pub link: Option<String>,
    pub active: bool,
    pub user_id: UserId,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = diets)]
#[diesel(treat_none_as_null = true)]
pub struct DietForm {
    pub min_meals: i32,
    pub max_meals: i32,
    pub total_calories: i32,
    pub link: Option<String>,
    pub active: bool,
}

#[derive(Debug, Display, EnumIter, Hash, Copy, Clone, PartialEq, Eq, DbEnum)]
pub enum MealType {
    #[display("breakfast")]
    Breakfast,
    #[display("lunch")]
    Lunch,
    #[display("dinner")]
    Dinner,
    #[display("snack")]
    Snack,
    #[display("late-snack")]
    LateSnack,
}

impl MealType {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

#[derive(Associations, Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = meals)]
pub struct Meal {
    pub id: MealId,
    pub date: chrono::NaiveDate,
    pub meal_type: MealType,
    pub user_id: UserId,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = meals)]
pub struct MealForm {
    pub date: chrono::NaiveDate,
    pub meal_type: MealType,
}

// Junction rows. A side is `None` once the row it pointed at was deleted under a set-null rule.

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = ingredient_recipes)]
pub struct IngredientRecipe {
    pub id: LinkId,
    pub ingredient_id: IngredientId,
    pub recipe_id: RecipeId,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = recipe_meals)]
pub struct RecipeMeal {
    pub id: LinkId,
    pub recipe_id: Option<RecipeId>,
    pub meal_id: Option<MealId>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = meal_diets)]
pub struct MealDiet {
    pub id: LinkId,
    pub diet_id: Option<DietId>,
    pub meal_id: Option<MealId>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = meal_schedules)]
pub struct MealSchedule {
    pub id: LinkId,
    pub food_schedule_id: Option<FoodScheduleId>,
    pub meal_id: Option<MealId>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = ingredient_diets)]
pub struct IngredientDiet {
    pub id: LinkId,
    pub ingredient_id: IngredientId,
    pub diet_id: Option<DietId>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = user_restrictions)]
pub struct UserRestriction {
    pub id: LinkId,
    pub restriction_id: Option<DietaryRestrictionId>,
    pub user_id: Option<UserId>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = ingredient_shopping_lists)]
pub struct IngredientShoppingList {
    pub id: LinkId,
    pub ingredient_id: IngredientId,
    pub shopping_list_id: Option<ShoppingListId>,
}

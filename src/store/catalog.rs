// Copyright 2023 Remi Bernotavicius

use super::{check_max_length, check_required, delete_row, in_transaction, require, DeleteReport};
use crate::database;
use crate::database::models::{
    Category, CategoryForm, CategoryId, DietaryRestriction, DietaryRestrictionForm,
    DietaryRestrictionId, Ingredient, IngredientForm, IngredientId, NewRecipe, NewShoppingList,
    Recipe, RecipeForm, RecipeId, ShoppingList, ShoppingListId,
};
use crate::database::schema::{categories, dietary_restrictions, ingredients, recipes, shopping_lists};
use crate::error::{Error, Result};
use crate::store::relations::Table;
use diesel::expression_methods::EscapeExpressionMethods as _;
use diesel::expression_methods::TextExpressionMethods as _;
use diesel::BelongingToDsl as _;
use diesel::ExpressionMethods as _;
use diesel::OptionalExtension as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

/// A `LIKE` pattern matching values that contain `query` literally, escaped with `\`.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// Dietary restrictions

fn validate_restriction(form: &DietaryRestrictionForm) -> Result<()> {
    check_required("restriction kind", &form.kind, 30)?;
    check_max_length("restriction description", &form.description, 100)
}

pub fn create_restriction(
    conn: &mut database::Connection,
    form: &DietaryRestrictionForm,
) -> Result<DietaryRestriction> {
    validate_restriction(form)?;
    in_transaction(conn, |conn| {
        let restriction = diesel::insert_into(dietary_restrictions::table)
            .values(form)
            .returning(DietaryRestriction::as_returning())
            .get_result(conn)?;
        log::debug!("created dietary restriction {}", restriction.id);
        Ok(restriction)
    })
}

pub fn get_restriction(
    conn: &mut database::Connection,
    id: DietaryRestrictionId,
) -> Result<DietaryRestriction> {
    dietary_restrictions::table
        .find(id)
        .select(DietaryRestriction::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::DietaryRestrictions, id.get()))
}

pub fn list_restrictions(
    conn: &mut database::Connection,
    active_only: bool,
) -> Result<Vec<DietaryRestriction>> {
    let mut query = dietary_restrictions::table
        .select(DietaryRestriction::as_select())
        .order(dietary_restrictions::id)
        .into_boxed();
    if active_only {
        query = query.filter(dietary_restrictions::active.eq(true));
    }
    Ok(query.load(conn)?)
}

pub fn update_restriction(
    conn: &mut database::Connection,
    id: DietaryRestrictionId,
    form: &DietaryRestrictionForm,
) -> Result<DietaryRestriction> {
    validate_restriction(form)?;
    in_transaction(conn, |conn| {
        diesel::update(dietary_restrictions::table.find(id))
            .set(form)
            .returning(DietaryRestriction::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::DietaryRestrictions, id.get()))
    })
}

pub fn delete_restriction(
    conn: &mut database::Connection,
    id: DietaryRestrictionId,
) -> Result<DeleteReport> {
    delete_row(conn, Table::DietaryRestrictions, id.get())
}

// Categories

fn validate_category(form: &CategoryForm) -> Result<()> {
    check_required("category name", &form.name, 50)?;
    if let Some(description) = &form.description {
        check_max_length("category description", description, 200)?;
    }
    Ok(())
}

pub fn create_category(conn: &mut database::Connection, form: &CategoryForm) -> Result<Category> {
    validate_category(form)?;
    in_transaction(conn, |conn| {
        let category = diesel::insert_into(categories::table)
            .values(form)
            .returning(Category::as_returning())
            .get_result(conn)?;
        log::debug!("created category {} {:?}", category.id, category.name);
        Ok(category)
    })
}

pub fn get_category(conn: &mut database::Connection, id: CategoryId) -> Result<Category> {
    categories::table
        .find(id)
        .select(Category::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::Categories, id.get()))
}

pub fn list_categories(conn: &mut database::Connection) -> Result<Vec<Category>> {
    Ok(categories::table
        .select(Category::as_select())
        .order(categories::name)
        .load(conn)?)
}

pub fn update_category(
    conn: &mut database::Connection,
    id: CategoryId,
    form: &CategoryForm,
) -> Result<Category> {
    validate_category(form)?;
    in_transaction(conn, |conn| {
        diesel::update(categories::table.find(id))
            .set(form)
            .returning(Category::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::Categories, id.get()))
    })
}

/// The category's ingredients are kept and become uncategorized.
pub fn delete_category(conn: &mut database::Connection, id: CategoryId) -> Result<DeleteReport> {
    delete_row(conn, Table::Categories, id.get())
}

// Ingredients

fn validate_ingredient(conn: &mut database::Connection, form: &IngredientForm) -> Result<()> {
    check_required("ingredient name", &form.name, 100)?;
    if let Some(category) = form.category_id {
        require(conn, Table::Categories, category.get())?;
    }
    Ok(())
}

pub fn create_ingredient(
    conn: &mut database::Connection,
    form: &IngredientForm,
) -> Result<Ingredient> {
    in_transaction(conn, |conn| {
        validate_ingredient(conn, form)?;
        let ingredient = diesel::insert_into(ingredients::table)
            .values(form)
            .returning(Ingredient::as_returning())
            .get_result(conn)?;
        log::debug!("created ingredient {} {:?}", ingredient.id, ingredient.name);
        Ok(ingredient)
    })
}

pub fn get_ingredient(conn: &mut database::Connection, id: IngredientId) -> Result<Ingredient> {
    ingredients::table
        .find(id)
        .select(Ingredient::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::Ingredients, id.get()))
}

pub fn list_ingredients(conn: &mut database::Connection) -> Result<Vec<Ingredient>> {
    Ok(ingredients::table
        .select(Ingredient::as_select())
        .order(ingredients::name)
        .load(conn)?)
}

pub fn list_category_ingredients(
    conn: &mut database::Connection,
    category: CategoryId,
) -> Result<Vec<Ingredient>> {
    let category = get_category(conn, category)?;
    Ok(Ingredient::belonging_to(&category)
        .select(Ingredient::as_select())
        .order(ingredients::name)
        .load(conn)?)
}

pub fn list_uncategorized_ingredients(conn: &mut database::Connection) -> Result<Vec<Ingredient>> {
    Ok(ingredients::table
        .select(Ingredient::as_select())
        .filter(ingredients::category_id.is_null())
        .order(ingredients::name)
        .load(conn)?)
}

pub fn search_ingredients(conn: &mut database::Connection, query: &str) -> Result<Vec<Ingredient>> {
    Ok(ingredients::table
        .select(Ingredient::as_select())
        .filter(ingredients::name.like(contains_pattern(query)).escape('\\'))
        .order(ingredients::name)
        .load(conn)?)
}

pub fn update_ingredient(
    conn: &mut database::Connection,
    id: IngredientId,
    form: &IngredientForm,
) -> Result<Ingredient> {
    in_transaction(conn, |conn| {
        validate_ingredient(conn, form)?;
        diesel::update(ingredients::table.find(id))
            .set(form)
            .returning(Ingredient::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::Ingredients, id.get()))
    })
}

/// Fails while any recipe, diet or shopping list still uses the ingredient.
pub fn delete_ingredient(conn: &mut database::Connection, id: IngredientId) -> Result<DeleteReport> {
    delete_row(conn, Table::Ingredients, id.get())
}

// Recipes

fn validate_recipe(title: &str, instructions: &str) -> Result<()> {
    check_required("recipe title", title, 100)?;
    if instructions.trim().is_empty() {
        return Err(Error::ConstraintViolation(
            "recipe instructions are required".into(),
        ));
    }
    Ok(())
}

pub(crate) fn insert_recipe(conn: &mut database::Connection, new: &NewRecipe<'_>) -> Result<Recipe> {
    validate_recipe(new.title, new.instructions)?;
    let recipe = diesel::insert_into(recipes::table)
        .values(new)
        .returning(Recipe::as_returning())
        .get_result(conn)?;
    log::debug!("created recipe {} {:?}", recipe.id, recipe.title);
    Ok(recipe)
}

/// A recipe written by hand. See [`crate::generation`] for generated ones.
pub fn create_recipe(conn: &mut database::Connection, form: &RecipeForm) -> Result<Recipe> {
    in_transaction(conn, |conn| {
        insert_recipe(
            conn,
            &NewRecipe {
                title: &form.title,
                instructions: &form.instructions,
                prep_minutes: form.prep_minutes,
                generation_prompt: None,
                is_ai_generated: false,
            },
        )
    })
}

pub fn get_recipe(conn: &mut database::Connection, id: RecipeId) -> Result<Recipe> {
    recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::Recipes, id.get()))
}

pub fn list_recipes(conn: &mut database::Connection) -> Result<Vec<Recipe>> {
    Ok(recipes::table
        .select(Recipe::as_select())
        .order(recipes::id)
        .load(conn)?)
}

pub fn search_recipes(conn: &mut database::Connection, query: &str) -> Result<Vec<Recipe>> {
    Ok(recipes::table
        .select(Recipe::as_select())
        .filter(recipes::title.like(contains_pattern(query)).escape('\\'))
        .order(recipes::title)
        .load(conn)?)
}

pub fn update_recipe(
    conn: &mut database::Connection,
    id: RecipeId,
    form: &RecipeForm,
) -> Result<Recipe> {
    validate_recipe(&form.title, &form.instructions)?;
    in_transaction(conn, |conn| {
        diesel::update(recipes::table.find(id))
            .set(form)
            .returning(Recipe::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::Recipes, id.get()))
    })
}

/// Fails while the recipe still lists ingredients; meals that used it keep their other recipes.
pub fn delete_recipe(conn: &mut database::Connection, id: RecipeId) -> Result<DeleteReport> {
    delete_row(conn, Table::Recipes, id.get())
}

// Shopping lists

/// A new, active list dated today.
pub fn create_shopping_list(conn: &mut database::Connection) -> Result<ShoppingList> {
    in_transaction(conn, |conn| {
        let list = diesel::insert_into(shopping_lists::table)
            .values(NewShoppingList {
                created_date: chrono::Local::now().date_naive(),
                active: true,
            })
            .returning(ShoppingList::as_returning())
            .get_result(conn)?;
        log::debug!("created shopping list {}", list.id);
        Ok(list)
    })
}

pub fn get_shopping_list(
    conn: &mut database::Connection,
    id: ShoppingListId,
) -> Result<ShoppingList> {
    shopping_lists::table
        .find(id)
        .select(ShoppingList::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::ShoppingLists, id.get()))
}

pub fn list_shopping_lists(
    conn: &mut database::Connection,
    active_only: bool,
) -> Result<Vec<ShoppingList>> {
    let mut query = shopping_lists::table
        .select(ShoppingList::as_select())
        .order(shopping_lists::id)
        .into_boxed();
    if active_only {
        query = query.filter(shopping_lists::active.eq(true));
    }
    Ok(query.load(conn)?)
}

pub fn set_shopping_list_active(
    conn: &mut database::Connection,
    list_id: ShoppingListId,
    new_active: bool,
) -> Result<ShoppingList> {
    in_transaction(conn, |conn| {
        diesel::update(shopping_lists::table.find(list_id))
            .set(shopping_lists::active.eq(new_active))
            .returning(ShoppingList::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::ShoppingLists, list_id.get()))
    })
}

pub fn delete_shopping_list(
    conn: &mut database::Connection,
    id: ShoppingListId,
) -> Result<DeleteReport> {
    delete_row(conn, Table::ShoppingLists, id.get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::junctions;

    fn category(conn: &mut database::Connection, name: &str) -> Category {
        create_category(
            conn,
            &CategoryForm {
                name: name.into(),
                description: None,
            },
        )
        .unwrap()
    }

    fn ingredient(
        conn: &mut database::Connection,
        name: &str,
        calories: i32,
        category: Option<CategoryId>,
    ) -> Ingredient {
        create_ingredient(
            conn,
            &IngredientForm {
                name: name.into(),
                calories,
                category_id: category,
            },
        )
        .unwrap()
    }

    fn recipe(conn: &mut database::Connection, title: &str) -> Recipe {
        create_recipe(
            conn,
            &RecipeForm {
                title: title.into(),
                instructions: "Cozinhe.".into(),
                prep_minutes: 20,
            },
        )
        .unwrap()
    }

    #[test]
    fn create_category_and_ingredient() {
        let mut conn = database::establish_in_memory().unwrap();
        let carbs = create_category(
            &mut conn,
            &CategoryForm {
                name: "Carboidrato".into(),
                description: Some("Fontes de energia".into()),
            },
        )
        .unwrap();
        let rice = ingredient(&mut conn, "Arroz", 130, Some(carbs.id));

        assert_eq!(get_ingredient(&mut conn, rice.id).unwrap(), rice);
        assert_eq!(rice.calories, 130);
        assert_eq!(
            get_category(&mut conn, rice.category_id.unwrap()).unwrap().name,
            "Carboidrato"
        );
    }

    #[test]
    fn list_several_categories() {
        let mut conn = database::establish_in_memory().unwrap();
        for name in ["Proteína", "Carboidrato", "Gordura Boa"] {
            category(&mut conn, name);
        }
        let names: Vec<_> = list_categories(&mut conn)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Carboidrato", "Gordura Boa", "Proteína"]);
    }

    #[test]
    fn category_names_are_unique() {
        let mut conn = database::establish_in_memory().unwrap();
        category(&mut conn, "Proteína");
        let e = create_category(
            &mut conn,
            &CategoryForm {
                name: "Proteína".into(),
                description: Some("again".into()),
            },
        )
        .unwrap_err();
        assert!(matches!(e, Error::ConstraintViolation(_)), "{e}");
        assert_eq!(list_categories(&mut conn).unwrap().len(), 1);
    }

    #[test]
    fn renaming_onto_an_existing_category_fails() {
        let mut conn = database::establish_in_memory().unwrap();
        category(&mut conn, "Proteína");
        let carbs = category(&mut conn, "Carboidrato");
        let e = update_category(
            &mut conn,
            carbs.id,
            &CategoryForm {
                name: "Proteína".into(),
                description: None,
            },
        )
        .unwrap_err();
        assert!(matches!(e, Error::ConstraintViolation(_)), "{e}");
        assert_eq!(get_category(&mut conn, carbs.id).unwrap().name, "Carboidrato");
    }

    #[test]
    fn category_name_limits() {
        let mut conn = database::establish_in_memory().unwrap();
        for name in [String::new(), "x".repeat(51)] {
            let e = create_category(
                &mut conn,
                &CategoryForm {
                    name,
                    description: None,
                },
            )
            .unwrap_err();
            assert!(matches!(e, Error::ConstraintViolation(_)), "{e}");
        }
    }

    #[test]
    fn deleting_a_category_uncategorizes_its_ingredients() {
        let mut conn = database::establish_in_memory().unwrap();
        let carbs = category(&mut conn, "Carboidrato");
        let rice = ingredient(&mut conn, "Arroz", 130, Some(carbs.id));

        let report = delete_category(&mut conn, carbs.id).unwrap();
        assert!(report.was_deleted(Table::Categories, carbs.id.get()));
        assert_eq!(report.nullified, 1);

        let rice = get_ingredient(&mut conn, rice.id).unwrap();
        assert_eq!(rice.name, "Arroz");
        assert_eq!(rice.category_id, None);
        assert_eq!(
            list_uncategorized_ingredients(&mut conn).unwrap(),
            vec![rice]
        );
        assert!(matches!(
            get_category(&mut conn, carbs.id),
            Err(Error::NotFound {
                entity: Table::Categories,
                ..
            })
        ));
    }

    #[test]
    fn ingredient_with_missing_category() {
        let mut conn = database::establish_in_memory().unwrap();
        let e = create_ingredient(
            &mut conn,
            &IngredientForm {
                name: "Arroz".into(),
                calories: 130,
                category_id: Some(CategoryId::new(42)),
            },
        )
        .unwrap_err();
        assert!(
            matches!(
                e,
                Error::NotFound {
                    entity: Table::Categories,
                    id: 42
                }
            ),
            "{e}"
        );
        assert!(list_ingredients(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn ingredients_by_category_and_name() {
        let mut conn = database::establish_in_memory().unwrap();
        let carbs = category(&mut conn, "Carboidrato");
        let protein = category(&mut conn, "Proteína");
        let rice = ingredient(&mut conn, "Arroz", 130, Some(carbs.id));
        let brown_rice = ingredient(&mut conn, "Arroz integral", 111, Some(carbs.id));
        let chicken = ingredient(&mut conn, "Frango", 165, Some(protein.id));

        assert_eq!(
            list_category_ingredients(&mut conn, carbs.id).unwrap(),
            vec![rice.clone(), brown_rice.clone()]
        );
        assert_eq!(
            list_category_ingredients(&mut conn, protein.id).unwrap(),
            vec![chicken]
        );
        assert_eq!(
            search_ingredients(&mut conn, "Arroz").unwrap(),
            vec![rice, brown_rice]
        );
    }

    #[test]
    fn update_ingredient_fields() {
        let mut conn = database::establish_in_memory().unwrap();
        let carbs = category(&mut conn, "Carboidrato");
        let rice = ingredient(&mut conn, "Arroz", 130, None);

        let updated = update_ingredient(
            &mut conn,
            rice.id,
            &IngredientForm {
                name: "Arroz branco".into(),
                calories: 128,
                category_id: Some(carbs.id),
            },
        )
        .unwrap();
        assert_eq!(updated.name, "Arroz branco");
        assert_eq!(updated.calories, 128);
        assert_eq!(updated.category_id, Some(carbs.id));

        let e = update_ingredient(
            &mut conn,
            IngredientId::new(99),
            &IngredientForm {
                name: "Feijão".into(),
                calories: 76,
                category_id: None,
            },
        )
        .unwrap_err();
        assert!(matches!(e, Error::NotFound { id: 99, .. }), "{e}");
    }

    #[test]
    fn ingredient_in_a_recipe_cannot_be_deleted() {
        let mut conn = database::establish_in_memory().unwrap();
        let rice = ingredient(&mut conn, "Arroz", 130, None);
        let risotto = recipe(&mut conn, "Risoto");
        junctions::add_recipe_ingredient(&mut conn, risotto.id, rice.id).unwrap();

        let e = delete_ingredient(&mut conn, rice.id).unwrap_err();
        assert!(
            matches!(
                e,
                Error::ReferentialIntegrity {
                    entity: Table::Ingredients,
                    ..
                }
            ),
            "{e}"
        );
        assert_eq!(get_ingredient(&mut conn, rice.id).unwrap(), rice);

        // The recipe side is protected too.
        let e = delete_recipe(&mut conn, risotto.id).unwrap_err();
        assert!(matches!(e, Error::ReferentialIntegrity { .. }), "{e}");

        assert!(junctions::remove_recipe_ingredient(&mut conn, risotto.id, rice.id).unwrap());
        delete_ingredient(&mut conn, rice.id).unwrap();
        delete_recipe(&mut conn, risotto.id).unwrap();
    }

    #[test]
    fn ingredient_on_a_shopping_list_cannot_be_deleted() {
        let mut conn = database::establish_in_memory().unwrap();
        let rice = ingredient(&mut conn, "Arroz", 130, None);
        let list = create_shopping_list(&mut conn).unwrap();
        junctions::add_shopping_list_ingredient(&mut conn, list.id, rice.id).unwrap();

        let e = delete_ingredient(&mut conn, rice.id).unwrap_err();
        assert!(matches!(e, Error::ReferentialIntegrity { .. }), "{e}");

        // Deleting the list instead keeps the item row with its ingredient.
        let report = delete_shopping_list(&mut conn, list.id).unwrap();
        assert_eq!(report.nullified, 1);
        let items = junctions::shopping_list_item_rows(&mut conn).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].ingredient_id, rice.id);
        assert_eq!(items[0].shopping_list_id, None);

        // The orphaned row still protects the ingredient.
        assert!(delete_ingredient(&mut conn, rice.id).is_err());
    }

    #[test]
    fn unused_ingredient_can_be_deleted() {
        let mut conn = database::establish_in_memory().unwrap();
        let rice = ingredient(&mut conn, "Arroz", 130, None);
        let report = delete_ingredient(&mut conn, rice.id).unwrap();
        assert_eq!(report.deleted_count(Table::Ingredients), 1);
        assert!(matches!(
            delete_ingredient(&mut conn, rice.id),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn manual_recipes_are_not_generated() {
        let mut conn = database::establish_in_memory().unwrap();
        let risotto = recipe(&mut conn, "Risoto");
        assert!(!risotto.is_ai_generated);
        assert_eq!(risotto.generation_prompt, None);

        let updated = update_recipe(
            &mut conn,
            risotto.id,
            &RecipeForm {
                title: "Risoto de cogumelos".into(),
                instructions: "Refogue e cozinhe.".into(),
                prep_minutes: 35,
            },
        )
        .unwrap();
        assert_eq!(updated.prep_minutes, 35);
        assert_eq!(
            search_recipes(&mut conn, "cogumelos").unwrap(),
            vec![updated]
        );
    }

    #[test]
    fn recipe_requires_title_and_instructions() {
        let mut conn = database::establish_in_memory().unwrap();
        let e = create_recipe(
            &mut conn,
            &RecipeForm {
                title: "Risoto".into(),
                instructions: " ".into(),
                prep_minutes: 20,
            },
        )
        .unwrap_err();
        assert!(matches!(e, Error::ConstraintViolation(_)), "{e}");
        assert!(list_recipes(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn shopping_list_visibility() {
        let mut conn = database::establish_in_memory().unwrap();
        let first = create_shopping_list(&mut conn).unwrap();
        let second = create_shopping_list(&mut conn).unwrap();
        assert!(first.active);
        assert_eq!(first.created_date, chrono::Local::now().date_naive());

        set_shopping_list_active(&mut conn, first.id, false).unwrap();
        assert_eq!(list_shopping_lists(&mut conn, true).unwrap(), vec![second]);
        assert_eq!(list_shopping_lists(&mut conn, false).unwrap().len(), 2);
    }

    #[test]
    fn restrictions_visibility() {
        let mut conn = database::establish_in_memory().unwrap();
        let lactose = create_restriction(
            &mut conn,
            &DietaryRestrictionForm {
                kind: "Lactose".into(),
                description: "Intolerância à lactose".into(),
                active: true,
            },
        )
        .unwrap();
        let gluten = create_restriction(
            &mut conn,
            &DietaryRestrictionForm {
                kind: "Glúten".into(),
                description: String::new(),
                active: false,
            },
        )
        .unwrap();

        assert_eq!(list_restrictions(&mut conn, true).unwrap(), vec![lactose.clone()]);
        assert_eq!(
            list_restrictions(&mut conn, false).unwrap(),
            vec![lactose, gluten.clone()]
        );

        let gluten = update_restriction(
            &mut conn,
            gluten.id,
            &DietaryRestrictionForm {
                kind: gluten.kind.clone(),
                description: gluten.description.clone(),
                active: true,
            },
        )
        .unwrap();
        assert!(get_restriction(&mut conn, gluten.id).unwrap().active);
    }

    #[test]
    fn search_matches_wildcards_literally() {
        let mut conn = database::establish_in_memory().unwrap();
        ingredient(&mut conn, "Arroz", 130, None);
        ingredient(&mut conn, "Feijão", 76, None);
        let milk = ingredient(&mut conn, "Leite 100% integral", 61, None);

        assert_eq!(search_ingredients(&mut conn, "%").unwrap(), vec![milk.clone()]);
        assert_eq!(search_ingredients(&mut conn, "0% i").unwrap(), vec![milk]);
        assert!(search_ingredients(&mut conn, "_").unwrap().is_empty());
        assert_eq!(search_ingredients(&mut conn, "").unwrap().len(), 3);

        recipe(&mut conn, "Bolo de milho");
        let snake = recipe(&mut conn, "Bolo_de_fubá");
        assert_eq!(search_recipes(&mut conn, "o_d").unwrap(), vec![snake]);
        assert!(search_recipes(&mut conn, "\\").unwrap().is_empty());
        assert_eq!(search_recipes(&mut conn, "bolo").unwrap().len(), 2);
    }
}

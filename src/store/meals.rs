// Copyright 2023 Remi Bernotavicius

use super::{delete_row, in_transaction, require, DeleteReport};
use crate::database;
use crate::database::models::{Meal, MealForm, MealId, UserId};
use crate::database::schema::meals;
use crate::error::{Error, Result};
use crate::store::relations::Table;
use diesel::BelongingToDsl as _;
use diesel::BoolExpressionMethods as _;
use diesel::ExpressionMethods as _;
use diesel::OptionalExtension as _;
use diesel::QueryDsl as _;
use diesel::RunQueryDsl as _;
use diesel::SelectableHelper as _;

/// Once a user has a meal they can no longer be deleted.
pub fn create_meal(conn: &mut database::Connection, user: UserId, form: &MealForm) -> Result<Meal> {
    in_transaction(conn, |conn| {
        require(conn, Table::Users, user.get())?;
        let meal = diesel::insert_into(meals::table)
            .values((form, meals::user_id.eq(user)))
            .returning(Meal::as_returning())
            .get_result(conn)?;
        log::debug!(
            "created {} on {} for user {user} (meal {})",
            meal.meal_type,
            meal.date,
            meal.id
        );
        Ok(meal)
    })
}

pub fn get_meal(conn: &mut database::Connection, id: MealId) -> Result<Meal> {
    meals::table
        .find(id)
        .select(Meal::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::not_found(Table::Meals, id.get()))
}

pub fn list_meals(conn: &mut database::Connection, user: UserId) -> Result<Vec<Meal>> {
    let user = crate::store::get_user(conn, user)?;
    Ok(Meal::belonging_to(&user)
        .select(Meal::as_select())
        .order((meals::date, meals::id))
        .load(conn)?)
}

/// The user's meals between `start` and `end`, both inclusive.
pub fn list_meals_between(
    conn: &mut database::Connection,
    user: UserId,
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<Vec<Meal>> {
    require(conn, Table::Users, user.get())?;
    Ok(meals::table
        .select(Meal::as_select())
        .filter(meals::user_id.eq(user))
        .filter(meals::date.ge(start).and(meals::date.le(end)))
        .order((meals::date, meals::id))
        .load(conn)?)
}

pub fn update_meal(conn: &mut database::Connection, id: MealId, form: &MealForm) -> Result<Meal> {
    in_transaction(conn, |conn| {
        diesel::update(meals::table.find(id))
            .set(form)
            .returning(Meal::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or(Error::not_found(Table::Meals, id.get()))
    })
}

/// The meal's recipe, diet and schedule links stay behind with their meal side cleared.
pub fn delete_meal(conn: &mut database::Connection, id: MealId) -> Result<DeleteReport> {
    delete_row(conn, Table::Meals, id.get())
}

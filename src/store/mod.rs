// Copyright 2023 Remi Bernotavicius

//! Create, read, update and delete for every entity. Writes each run in their own transaction, and
//! deletes follow the rules in [`relations`].

use crate::database;
use crate::error::{Error, Result};
use diesel::prelude::Connection as _;
use relations::Table;

mod accounts;
mod catalog;
mod collector;
pub mod junctions;
mod meals;
pub mod relations;

pub use accounts::*;
pub use catalog::*;
pub use collector::DeleteReport;
pub use meals::*;

/// Commits if `f` returns `Ok`, rolls back otherwise.
pub(crate) fn in_transaction<T>(
    conn: &mut database::Connection,
    f: impl FnOnce(&mut database::Connection) -> Result<T>,
) -> Result<T> {
    conn.transaction(f)
}

fn delete_row(conn: &mut database::Connection, table: Table, id: i32) -> Result<DeleteReport> {
    in_transaction(conn, |conn| collector::delete(conn, table, id))
}

/// Fails with `NotFound` unless `table` has a row with this id.
fn require(conn: &mut database::Connection, table: Table, id: i32) -> Result<()> {
    if table.contains(conn, id)? {
        Ok(())
    } else {
        Err(Error::not_found(table, id))
    }
}

/// A required text field: not blank and at most `max` characters.
fn check_required(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::ConstraintViolation(format!("{field} is required")));
    }
    check_max_length(field, value, max)
}

fn check_max_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(Error::ConstraintViolation(format!(
            "{field} is {len} characters long, the limit is {max}"
        )));
    }
    Ok(())
}

#[test]
fn field_checks() {
    assert!(check_required("name", "Arroz", 100).is_ok());
    assert!(matches!(
        check_required("name", "  ", 100),
        Err(Error::ConstraintViolation(_))
    ));
    // Limits count characters, not bytes.
    assert!(check_max_length("name", "Proteína", 8).is_ok());
    assert!(matches!(
        check_max_length("name", "Proteínas", 8),
        Err(Error::ConstraintViolation(_))
    ));
}

#[test]
fn rolled_back_on_error() {
    use crate::database::schema::profiles;
    use diesel::ExpressionMethods as _;
    use diesel::QueryDsl as _;
    use diesel::RunQueryDsl as _;

    let mut conn = database::establish_in_memory().unwrap();
    let result: Result<()> = in_transaction(&mut conn, |conn| {
        diesel::insert_into(profiles::table)
            .values(profiles::kind.eq("Atleta"))
            .execute(conn)?;
        Err(Error::ConstraintViolation("abort".into()))
    });
    assert!(result.is_err());

    let count: i64 = profiles::table.count().get_result(&mut conn).unwrap();
    assert_eq!(count, 0);
}

// Copyright 2023 Remi Bernotavicius

use crate::error::{Error, Result};
use diesel::prelude::Connection as _;
use diesel::RunQueryDsl as _;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::path::Path;

pub mod models;
pub mod schema;

pub type Connection = diesel::sqlite::SqliteConnection;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// SQLite leaves foreign keys off unless asked, and the setting is per connection. It has to be
/// set outside of any transaction to take effect.
fn enable_foreign_keys(conn: &mut Connection) -> Result<()> {
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(conn)?;
    Ok(())
}

fn setup(mut connection: Connection) -> Result<Connection> {
    enable_foreign_keys(&mut connection)?;
    connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(Error::Migration)?;
    Ok(connection)
}

pub fn establish_connection(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let url = path.to_string_lossy();
    log::debug!("opening database at {url}");
    setup(Connection::establish(&url)?)
}

/// A private database that lives as long as the connection. Used by the tests.
pub fn establish_in_memory() -> Result<Connection> {
    setup(Connection::establish(":memory:")?)
}

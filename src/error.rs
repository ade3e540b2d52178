// Copyright 2023 Remi Bernotavicius

use crate::generation::GenerationError;
use crate::store::relations::{Relation, Table};
use diesel::result::DatabaseErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A uniqueness, required-field, or field-length rule was broken by an insert or update.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// A delete was blocked because a restrict relation still has dependents.
    #[error("cannot delete {entity} {id}: still referenced through {relation}")]
    ReferentialIntegrity {
        entity: Table,
        id: i32,
        relation: Relation,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: Table, id: i32 },

    /// The recipe generator failed or returned something unusable. Nothing was stored.
    #[error("recipe generation failed: {0}")]
    ExternalService(#[from] GenerationError),

    #[error("database error: {0}")]
    Database(#[source] diesel::result::Error),

    #[error("failed to connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("failed to run migrations: {0}")]
    Migration(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn not_found(entity: Table, id: i32) -> Self {
        Self::NotFound { entity, id }
    }
}

/// Constraint failures reported by SQLite itself are surfaced the same way as the ones we detect
/// before writing.
impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => Self::ConstraintViolation(info.message().into()),
            e => Self::Database(e),
        }
    }
}

#[test]
fn unique_violation_is_a_constraint_violation() {
    use crate::database;
    use crate::database::schema::categories;
    use diesel::ExpressionMethods as _;
    use diesel::RunQueryDsl as _;

    let mut conn = database::establish_in_memory().unwrap();
    let insert = |conn: &mut database::Connection| {
        diesel::insert_into(categories::table)
            .values(categories::name.eq("Proteína"))
            .execute(conn)
            .map_err(Error::from)
    };
    insert(&mut conn).unwrap();
    let e = insert(&mut conn).unwrap_err();
    assert!(matches!(e, Error::ConstraintViolation(_)), "{e}");
}

#[test]
fn other_database_errors_are_kept() {
    let e = Error::from(diesel::result::Error::NotFound);
    assert!(matches!(e, Error::Database(diesel::result::Error::NotFound)));
}

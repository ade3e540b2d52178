// Copyright 2023 Remi Bernotavicius

//! Deletes a row according to the rules in [`RELATIONS`](super::relations::RELATIONS).
//!
//! The whole plan is worked out before anything is written: first everything reachable through
//! cascade relations, then the restrict checks against that set, and only then the set-null
//! updates and the deletes. A delete that is rejected leaves the database untouched even without
//! the surrounding transaction.

use super::relations::{self, OnDelete, Table};
use crate::database;
use crate::error::{Error, Result};
use diesel::sql_types::Integer;
use diesel::RunQueryDsl as _;
use std::collections::{BTreeMap, BTreeSet};

/// What a delete ended up touching.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: BTreeMap<Table, BTreeSet<i32>>,
    /// The number of references set to null, across all tables.
    pub nullified: usize,
}

impl DeleteReport {
    pub fn deleted_count(&self, table: Table) -> usize {
        self.deleted.get(&table).map_or(0, |ids| ids.len())
    }

    pub fn was_deleted(&self, table: Table, id: i32) -> bool {
        self.deleted.get(&table).is_some_and(|ids| ids.contains(&id))
    }
}

#[derive(Default)]
struct Collector {
    seen: BTreeSet<(Table, i32)>,
    // Dependents come before the rows they depend on.
    order: Vec<(Table, i32)>,
}

impl Collector {
    fn collect(&mut self, conn: &mut database::Connection, table: Table, id: i32) -> Result<()> {
        if !self.seen.insert((table, id)) {
            return Ok(());
        }
        for relation in relations::referencing(table).filter(|r| r.on_delete == OnDelete::Cascade)
        {
            for child_id in relation.referencing_rows(conn, id)? {
                self.collect(conn, relation.child, child_id)?;
            }
        }
        self.order.push((table, id));
        Ok(())
    }

    fn check_restrictions(&self, conn: &mut database::Connection) -> Result<()> {
        for &(table, id) in &self.order {
            for relation in
                relations::referencing(table).filter(|r| r.on_delete == OnDelete::Restrict)
            {
                let blocking = relation
                    .referencing_rows(conn, id)?
                    .into_iter()
                    .any(|child_id| !self.seen.contains(&(relation.child, child_id)));
                if blocking {
                    return Err(Error::ReferentialIntegrity {
                        entity: table,
                        id,
                        relation: *relation,
                    });
                }
            }
        }
        Ok(())
    }

    fn apply(self, conn: &mut database::Connection) -> Result<DeleteReport> {
        let mut report = DeleteReport::default();
        for &(table, id) in &self.order {
            for relation in relations::referencing(table).filter(|r| r.on_delete == OnDelete::SetNull)
            {
                report.nullified += relation.clear_references(conn, id)?;
            }
        }
        for (table, id) in self.order {
            let deleted = diesel::sql_query(format!("DELETE FROM {} WHERE id = ?", table.name()))
                .bind::<Integer, _>(id)
                .execute(conn);
            if let Err(e) = deleted {
                return Err(restricted_by_database(conn, e, table, id));
            }
            report.deleted.entry(table).or_default().insert(id);
        }
        Ok(report)
    }
}

/// SQLite enforces the same foreign keys. If it rejects a delete the rule table missed something,
/// and the caller should see the same error as for a rule we caught ourselves, naming the relation
/// that still has rows pointing at `id`.
fn restricted_by_database(
    conn: &mut database::Connection,
    e: diesel::result::Error,
    table: Table,
    id: i32,
) -> Error {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if !matches!(
        e,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    ) {
        return e.into();
    }
    for relation in relations::referencing(table) {
        if let Ok(rows) = relation.referencing_rows(conn, id) {
            if !rows.is_empty() {
                return Error::ReferentialIntegrity {
                    entity: table,
                    id,
                    relation: *relation,
                };
            }
        }
    }
    e.into()
}

/// Deletes `id` from `table` and applies the delete rules of everything that references it. Must
/// be called inside a transaction.
pub fn delete(conn: &mut database::Connection, table: Table, id: i32) -> Result<DeleteReport> {
    if !table.contains(conn, id)? {
        return Err(Error::not_found(table, id));
    }

    let mut collector = Collector::default();
    collector.collect(conn, table, id)?;
    if let Err(e) = collector.check_restrictions(conn) {
        log::warn!("refusing to delete {table} {id}: {e}");
        return Err(e);
    }

    let report = collector.apply(conn)?;
    log::info!(
        "deleted {table} {id} ({} rows removed, {} references cleared)",
        report.deleted.values().map(BTreeSet::len).sum::<usize>(),
        report.nullified
    );
    Ok(report)
}

//! Catalog repository
//!
//! [`Repository`] is the boundary the CLI talks to; [`Database`] is its
//! SQLite implementation. Callers pass whole entity values and never build
//! SQL themselves.
//!
//! Absence is not an error: `get_*` return `Ok(None)` and `delete` of an
//! unknown identity succeeds without doing anything.

use super::schema::{self, NOW_LOCAL};
use super::stats;
use super::timestamp::{format_timestamp, parse_timestamp};
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::naming::{self, Identity};
use crate::types::*;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const TABLE_COLUMNS: &str = "name, keys, path, engine, source, description, \
     script_file, script_tag, desc_file, desc_tag, log_file, create_at, modify_at";

const RECORD_COLUMNS: &str = "name, type, source, label, description, \
     number, missNumber, uniqueNumber, \
     script_file, script_tag, desc_file, desc_tag, log_file, create_at, modify_at";

/// Operations the catalog offers to its callers.
pub trait Repository {
    /// Insert a table and every record in `table.records`.
    ///
    /// Fails with `Conflict` if the table or any of the records exists.
    fn insert_table(&self, table: &Table) -> Result<()>;

    /// Insert a single record. The owning table need not exist.
    fn insert_record(&self, record: &Record) -> Result<()>;

    /// Look up a table by its `db:table` identity, with its records attached.
    fn get_table(&self, identity: &str) -> Result<Option<Table>>;

    /// Look up a record by its `db:table:record` identity.
    fn get_record(&self, identity: &str) -> Result<Option<Record>>;

    /// Overwrite every mutable column of an existing table and stamp
    /// `modify_at` with the current time. `NotFound` if nothing matched.
    fn update_table(&self, table: &Table) -> Result<()>;

    /// Record counterpart of [`Repository::update_table`].
    fn update_record(&self, record: &Record) -> Result<()>;

    /// Records whose identity matches `pattern` (`%` is the only wildcard).
    fn search_records(&self, pattern: &str) -> Result<Vec<Record>>;

    /// Delete a table (only with `force`, taking its records along) or a
    /// single record. Unknown identities are a no-op.
    fn delete(&self, identity: &str, force: bool) -> Result<()>;

    /// Usage snapshot of the catalog.
    fn statistics(&self) -> Result<Stats>;

    /// Check that the catalog answers queries.
    fn ping(&self) -> Result<()>;

    /// Location of the catalog.
    fn path(&self) -> &Path;

    /// Release the catalog.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// SQLite-backed catalog (single connection)
pub struct Database {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl Database {
    /// Open or create a catalog at the given path with default settings
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_config(path, &DatabaseConfig::default())
    }

    /// Open or create a catalog at the given path
    ///
    /// Creates the parent directory and the schema when missing.
    pub fn open_with_config(path: &Path, config: &DatabaseConfig) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        schema::init_schema(&conn)?;

        tracing::debug!(path = %path.display(), "Opened catalog");

        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_path_buf(),
        })
    }

    /// Open an in-memory catalog (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: PathBuf::from(":memory:"),
        })
    }

    /// The connection stays usable after a panic elsewhere; SQLite keeps
    /// its own consistency.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ============================================
    // Row encoding
    // ============================================

    fn insert_table_row(conn: &Connection, table: &Table) -> Result<()> {
        let key = table.full_name();
        conn.execute(
            &format!(
                "INSERT INTO data_table ({TABLE_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
            ),
            params![
                key,
                table.keys,
                table.path,
                table.engine,
                table.source,
                table.description,
                table.script_file,
                table.script_tag,
                table.desc_file,
                table.desc_tag,
                table.log_file,
                format_timestamp(&table.created_at),
                format_timestamp(&table.modified_at),
            ],
        )
        .map_err(|e| insert_error(e, "table", &key))?;
        Ok(())
    }

    fn insert_record_row(conn: &Connection, record: &Record) -> Result<()> {
        let key = record.full_name();
        conn.execute(
            &format!(
                "INSERT INTO data_record ({RECORD_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
            ),
            params![
                key,
                record.record_type,
                record.source,
                record.label,
                record.description,
                record.number,
                record.miss_number,
                record.unique_number,
                record.script_file,
                record.script_tag,
                record.desc_file,
                record.desc_tag,
                record.log_file,
                format_timestamp(&record.created_at),
                format_timestamp(&record.modified_at),
            ],
        )
        .map_err(|e| insert_error(e, "record", &key))?;
        Ok(())
    }

    fn row_to_table(row: &Row) -> rusqlite::Result<Table> {
        let key: String = row.get("name")?;
        let (database, name) = match naming::decode(&key).as_slice() {
            [database, name] => (database.to_string(), name.to_string()),
            _ => return Err(malformed(row, "name", format!("bad table identity '{key}'"))),
        };

        Ok(Table {
            database,
            name,
            keys: text(row, "keys")?,
            path: text(row, "path")?,
            engine: text(row, "engine")?,
            source: text(row, "source")?,
            description: text(row, "description")?,
            script_file: text(row, "script_file")?,
            script_tag: text(row, "script_tag")?,
            desc_file: text(row, "desc_file")?,
            desc_tag: text(row, "desc_tag")?,
            log_file: text(row, "log_file")?,
            created_at: timestamp(row, "create_at")?,
            modified_at: timestamp(row, "modify_at")?,
            records: Vec::new(),
        })
    }

    fn row_to_record(row: &Row) -> rusqlite::Result<Record> {
        let key: String = row.get("name")?;
        let (database, table, name) = match naming::decode(&key).as_slice() {
            [database, table, name] => (database.to_string(), table.to_string(), name.to_string()),
            _ => return Err(malformed(row, "name", format!("bad record identity '{key}'"))),
        };

        Ok(Record {
            database,
            table,
            name,
            record_type: text(row, "type")?,
            source: text(row, "source")?,
            label: text(row, "label")?,
            description: text(row, "description")?,
            number: count(row, "number")?,
            miss_number: count(row, "missNumber")?,
            unique_number: count(row, "uniqueNumber")?,
            script_file: text(row, "script_file")?,
            script_tag: text(row, "script_tag")?,
            desc_file: text(row, "desc_file")?,
            desc_tag: text(row, "desc_tag")?,
            log_file: text(row, "log_file")?,
            created_at: timestamp(row, "create_at")?,
            modified_at: timestamp(row, "modify_at")?,
        })
    }

    /// Records whose key matches a GLOB expression, optionally sorted by key.
    fn query_records(conn: &Connection, glob: &str, sorted: bool) -> Result<Vec<Record>> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM data_record WHERE name GLOB ?1{}",
            if sorted { " ORDER BY name" } else { "" }
        );
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map([glob], Self::row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn table_exists(conn: &Connection, key: &str) -> Result<bool> {
        let found = conn
            .query_row("SELECT 1 FROM data_table WHERE name = ?1", [key], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

impl Repository for Database {
    fn insert_table(&self, table: &Table) -> Result<()> {
        table.identity().validate()?;
        for record in &table.records {
            record.identity().validate()?;
        }

        let mut conn = self.conn();
        let tx = conn.transaction()?;

        Self::insert_table_row(&tx, table)?;
        for record in &table.records {
            Self::insert_record_row(&tx, record)?;
        }

        tx.commit()?;

        tracing::info!(
            identity = %table.full_name(),
            records = table.records.len(),
            "Inserted table"
        );
        Ok(())
    }

    fn insert_record(&self, record: &Record) -> Result<()> {
        record.identity().validate()?;

        let conn = self.conn();
        Self::insert_record_row(&conn, record)?;

        tracing::info!(identity = %record.full_name(), "Inserted record");
        Ok(())
    }

    fn get_table(&self, identity: &str) -> Result<Option<Table>> {
        let conn = self.conn();

        let table = conn
            .query_row(
                &format!("SELECT {TABLE_COLUMNS} FROM data_table WHERE name = ?1"),
                [identity],
                Self::row_to_table,
            )
            .optional()?;

        let Some(mut table) = table else {
            return Ok(None);
        };

        table.records = Self::query_records(&conn, &naming::child_glob(identity), true)?;
        Ok(Some(table))
    }

    fn get_record(&self, identity: &str) -> Result<Option<Record>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM data_record WHERE name = ?1"),
            [identity],
            Self::row_to_record,
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_table(&self, table: &Table) -> Result<()> {
        table.identity().validate()?;
        let key = table.full_name();

        let conn = self.conn();
        let changed = conn.execute(
            &format!(
                "UPDATE data_table SET
                    keys = ?1, path = ?2, engine = ?3, source = ?4, description = ?5,
                    script_file = ?6, script_tag = ?7, desc_file = ?8, desc_tag = ?9,
                    log_file = ?10, modify_at = {NOW_LOCAL}
                 WHERE name = ?11"
            ),
            params![
                table.keys,
                table.path,
                table.engine,
                table.source,
                table.description,
                table.script_file,
                table.script_tag,
                table.desc_file,
                table.desc_tag,
                table.log_file,
                key,
            ],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(format!("table {key}")));
        }

        tracing::info!(identity = %key, "Updated table");
        Ok(())
    }

    fn update_record(&self, record: &Record) -> Result<()> {
        record.identity().validate()?;
        let key = record.full_name();

        let conn = self.conn();
        let changed = conn.execute(
            &format!(
                "UPDATE data_record SET
                    type = ?1, source = ?2, label = ?3, description = ?4,
                    number = ?5, missNumber = ?6, uniqueNumber = ?7,
                    script_file = ?8, script_tag = ?9, desc_file = ?10, desc_tag = ?11,
                    log_file = ?12, modify_at = {NOW_LOCAL}
                 WHERE name = ?13"
            ),
            params![
                record.record_type,
                record.source,
                record.label,
                record.description,
                record.number,
                record.miss_number,
                record.unique_number,
                record.script_file,
                record.script_tag,
                record.desc_file,
                record.desc_tag,
                record.log_file,
                key,
            ],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(format!("record {key}")));
        }

        tracing::info!(identity = %key, "Updated record");
        Ok(())
    }

    fn search_records(&self, pattern: &str) -> Result<Vec<Record>> {
        let conn = self.conn();
        let records = Self::query_records(&conn, &naming::to_glob(pattern), false)?;
        tracing::debug!(pattern, matches = records.len(), "Searched records");
        Ok(records)
    }

    fn delete(&self, identity: &str, force: bool) -> Result<()> {
        let parsed = Identity::parse(identity)?;

        let mut conn = self.conn();

        if !parsed.is_table() {
            let removed = conn.execute("DELETE FROM data_record WHERE name = ?1", [identity])?;
            tracing::info!(identity, removed, "Deleted record");
            return Ok(());
        }

        // Existence check and both deletes see the same snapshot.
        let tx = conn.transaction()?;

        if !Self::table_exists(&tx, identity)? {
            tracing::debug!(identity, "Nothing to delete");
            return Ok(());
        }

        if !force {
            tracing::warn!(identity, "Refusing to delete table without force");
            return Err(Error::Conflict(format!(
                "cannot delete table {identity} without force flag"
            )));
        }

        let records = tx.execute(
            "DELETE FROM data_record WHERE name GLOB ?1",
            [naming::child_glob(identity)],
        )?;
        tx.execute("DELETE FROM data_table WHERE name = ?1", [identity])?;
        tx.commit()?;

        tracing::info!(identity, records, "Deleted table and its records");
        Ok(())
    }

    fn statistics(&self) -> Result<Stats> {
        let conn = self.conn();
        stats::collect(&conn, &self.path)
    }

    fn ping(&self) -> Result<()> {
        let conn = self.conn();
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        conn.close().map_err(|(_, e)| Error::Database(e))?;
        tracing::debug!(path = %self.path.display(), "Closed catalog");
        Ok(())
    }
}

fn insert_error(err: rusqlite::Error, kind: &str, key: &str) -> Error {
    if Error::is_duplicate_key(&err) {
        Error::Conflict(format!("{kind} {key} already exists"))
    } else {
        Error::Database(err)
    }
}

/// Optional text column; NULL reads as empty.
fn text(row: &Row, column: &str) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

/// Optional integer column; NULL reads as zero.
fn count(row: &Row, column: &str) -> rusqlite::Result<i64> {
    Ok(row.get::<_, Option<i64>>(column)?.unwrap_or_default())
}

fn timestamp(row: &Row, column: &str) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(column)?;
    parse_timestamp(&raw)
        .ok_or_else(|| malformed(row, column, format!("unrecognized timestamp '{raw}'")))
}

fn malformed(row: &Row, column: &str, message: String) -> rusqlite::Error {
    let index = row.as_ref().column_index(column).unwrap_or(0);
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn create_test_table() -> Table {
        let mut table = Table::new("testdb", "testtable");
        table.keys = "id".to_string();
        table.path = "/path/to/data".to_string();
        table.source = "test".to_string();
        table.description = "A test table".to_string();
        table
    }

    fn create_test_record(database: &str, table: &str, name: &str) -> Record {
        let mut record = Record::new(database, table, name);
        record.record_type = "test_type".to_string();
        record.source = "generated".to_string();
        record.label = "label1".to_string();
        record.description = "desc1".to_string();
        record
    }

    #[test]
    fn test_table_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let table = create_test_table();

        db.insert_table(&table).unwrap();

        let retrieved = db.get_table("testdb:testtable").unwrap().unwrap();
        assert_eq!(retrieved, table);
        assert!(retrieved.records.is_empty());
    }

    #[test]
    fn test_roundtrip_keeps_sub_millisecond_timestamps() {
        let db = Database::open_in_memory().unwrap();
        let at = chrono::NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_micro_opt(9, 0, 0, 123_456)
            .unwrap();

        let mut table = create_test_table();
        table.created_at = at;
        table.modified_at = at;
        db.insert_table(&table).unwrap();

        let mut record = create_test_record("db1", "tbl1", "rec1");
        record.created_at = at + chrono::Duration::nanoseconds(789);
        record.modified_at = at;
        db.insert_record(&record).unwrap();

        assert_eq!(db.get_table("testdb:testtable").unwrap().unwrap(), table);
        assert_eq!(db.get_record("db1:tbl1:rec1").unwrap().unwrap(), record);
    }

    #[test]
    fn test_record_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let mut record = create_test_record("db1", "tbl1", "rec1");
        record.number = 100;
        record.miss_number = 3;
        record.unique_number = 42;

        db.insert_record(&record).unwrap();

        let retrieved = db.get_record("db1:tbl1:rec1").unwrap().unwrap();
        assert_eq!(retrieved, record);
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_table("nope:nothing").unwrap().is_none());
        assert!(db.get_record("nope:nothing:here").unwrap().is_none());
        // Wrong shapes simply do not match anything on read
        assert!(db.get_table("nope").unwrap().is_none());
    }

    #[test]
    fn test_insert_table_with_records() {
        let db = Database::open_in_memory().unwrap();
        let mut table = create_test_table();
        table.records = vec![
            create_test_record("testdb", "testtable", "b"),
            create_test_record("testdb", "testtable", "a"),
        ];

        db.insert_table(&table).unwrap();

        let retrieved = db.get_table("testdb:testtable").unwrap().unwrap();
        let names: Vec<_> = retrieved.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_insert_table_child_conflict_rolls_back() {
        let db = Database::open_in_memory().unwrap();
        db.insert_record(&create_test_record("testdb", "testtable", "dup"))
            .unwrap();

        let mut table = create_test_table();
        table.records = vec![
            create_test_record("testdb", "testtable", "fresh"),
            create_test_record("testdb", "testtable", "dup"),
        ];

        let err = db.insert_table(&table).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(db.get_table("testdb:testtable").unwrap().is_none());
        assert!(db.get_record("testdb:testtable:fresh").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_conflicts() {
        let db = Database::open_in_memory().unwrap();
        let table = create_test_table();
        db.insert_table(&table).unwrap();

        let mut again = create_test_table();
        again.description = "changed".to_string();
        let err = db.insert_table(&again).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let stored = db.get_table("testdb:testtable").unwrap().unwrap();
        assert_eq!(stored.description, "A test table");
    }

    #[test]
    fn test_insert_rejects_delimiter_in_name() {
        let db = Database::open_in_memory().unwrap();
        let record = create_test_record("db1", "tbl1", "a:b");
        let err = db.insert_record(&record).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(db.search_records("%").unwrap().is_empty());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let err = db.update_table(&create_test_table()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = db
            .update_record(&create_test_record("db1", "tbl1", "ghost"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_update_record_overlays_fields() {
        let db = Database::open_in_memory().unwrap();
        let record = create_test_record("db1", "tbl1", "rec1");
        db.insert_record(&record).unwrap();

        let mut fetched = db.get_record("db1:tbl1:rec1").unwrap().unwrap();
        fetched.label = "new_label".to_string();
        fetched.number = 7;
        db.update_record(&fetched).unwrap();

        let updated = db.get_record("db1:tbl1:rec1").unwrap().unwrap();
        assert_eq!(updated.label, "new_label");
        assert_eq!(updated.number, 7);
        assert_eq!(updated.description, record.description);
        assert_eq!(updated.created_at, record.created_at);
        assert!(updated.modified_at >= record.modified_at);
    }

    #[test]
    fn test_update_ignores_supplied_modify_time() {
        let db = Database::open_in_memory().unwrap();
        let table = create_test_table();
        db.insert_table(&table).unwrap();

        let mut fetched = db.get_table("testdb:testtable").unwrap().unwrap();
        fetched.modified_at = chrono::NaiveDate::from_ymd_opt(1999, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        db.update_table(&fetched).unwrap();

        let stamped = db.get_table("testdb:testtable").unwrap().unwrap();
        assert!(stamped.modified_at >= table.modified_at);
    }

    #[test]
    fn test_search_records() {
        let db = Database::open_in_memory().unwrap();
        for name in ["rec_alpha", "rec_beta", "other_gamma"] {
            db.insert_record(&create_test_record("db1", "tbl1", name))
                .unwrap();
        }

        assert_eq!(db.search_records("db1:tbl1:rec_%").unwrap().len(), 2);
        assert_eq!(db.search_records("db1:tbl1:other%").unwrap().len(), 1);
        assert_eq!(db.search_records("db1:%").unwrap().len(), 3);
        assert!(db.search_records("db2:%").unwrap().is_empty());
    }

    #[test]
    fn test_search_only_percent_is_wildcard() {
        let db = Database::open_in_memory().unwrap();
        for name in ["rec_1", "recX1", "REC_2"] {
            db.insert_record(&create_test_record("db1", "tbl1", name))
                .unwrap();
        }

        // '_' is literal, matching is case-sensitive
        let found = db.search_records("db1:tbl1:rec_%").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "rec_1");

        // Exact identity without wildcard
        assert_eq!(db.search_records("db1:tbl1:recX1").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_record() {
        let db = Database::open_in_memory().unwrap();
        db.insert_record(&create_test_record("db1", "tbl1", "rec1"))
            .unwrap();

        db.delete("db1:tbl1:rec1", false).unwrap();
        assert!(db.get_record("db1:tbl1:rec1").unwrap().is_none());
    }

    #[test]
    fn test_delete_table_requires_force() {
        let db = Database::open_in_memory().unwrap();
        let mut table = Table::new("db1", "tbl1");
        table.keys = "id".to_string();
        table.records = vec![create_test_record("db1", "tbl1", "rec1")];
        db.insert_table(&table).unwrap();

        let err = db.delete("db1:tbl1", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(db.get_table("db1:tbl1").unwrap().is_some());
        assert!(db.get_record("db1:tbl1:rec1").unwrap().is_some());

        db.delete("db1:tbl1", true).unwrap();
        assert!(db.get_table("db1:tbl1").unwrap().is_none());
        assert!(db.get_record("db1:tbl1:rec1").unwrap().is_none());
    }

    #[test]
    fn test_cascade_spares_sibling_prefixes() {
        let db = Database::open_in_memory().unwrap();
        let mut table = Table::new("db1", "tbl");
        table.keys = "id".to_string();
        db.insert_table(&table).unwrap();
        db.insert_record(&create_test_record("db1", "tbl", "a")).unwrap();
        db.insert_record(&create_test_record("db1", "tbl2", "b")).unwrap();

        db.delete("db1:tbl", true).unwrap();

        assert!(db.get_record("db1:tbl:a").unwrap().is_none());
        assert!(db.get_record("db1:tbl2:b").unwrap().is_some());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let db = Database::open_in_memory().unwrap();
        let mut table = create_test_table();
        table.records = vec![create_test_record("testdb", "testtable", "rec1")];
        db.insert_table(&table).unwrap();
        db.insert_record(&create_test_record("db1", "other", "rec"))
            .unwrap();
        let before = db.get_table("testdb:testtable").unwrap().unwrap();

        db.delete("db1:ghost", false).unwrap();
        db.delete("db1:ghost", true).unwrap();
        db.delete("db1:ghost:rec", true).unwrap();
        db.delete("testdb:testtable:ghost", false).unwrap();

        let stats = db.statistics().unwrap();
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.record_count, 2);
        assert_eq!(db.get_table("testdb:testtable").unwrap().unwrap(), before);
        assert!(db.get_record("db1:other:rec").unwrap().is_some());
    }

    #[test]
    fn test_delete_rejects_malformed_identity() {
        let db = Database::open_in_memory().unwrap();
        let err = db.delete("just-a-name", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_corrupt_timestamp_is_malformed() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO data_record (name, type, label, create_at, modify_at)
                 VALUES ('db:t:r', 'x', 'x', 'not a time', 'not a time')",
                [],
            )
            .unwrap();

        let err = db.get_record("db:t:r").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_legacy_rows_decode() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO data_record (name, type, label, create_at, modify_at)
                 VALUES ('db:t:r', 'x', 'x', '2024-03-01 09:15:00', '2024-03-01 09:15:00')",
                [],
            )
            .unwrap();

        let record = db.get_record("db:t:r").unwrap().unwrap();
        assert_eq!(record.source, "unknown");
        assert_eq!(record.description, "");
        assert_eq!(record.number, 0);
    }

    #[test]
    fn test_ping_and_close() {
        let db = Database::open_in_memory().unwrap();
        db.ping().unwrap();
        assert_eq!(db.path(), Path::new(":memory:"));
        db.close().unwrap();
    }
}

//! Catalog schema
//!
//! Two relations, created idempotently on every open:
//! - `data_table`: one row per table, keyed by `database:table`
//! - `data_record`: one row per record, keyed by `database:table:record`
//!
//! There is no version table. Column names, types and defaults must stay
//! compatible with catalog files written by earlier releases.

use rusqlite::Connection;

/// SQL expression producing the local wall-clock time with milliseconds,
/// e.g. `2026-10-18 14:03:27.512`.
pub const NOW_LOCAL: &str = "STRFTIME('%Y-%m-%d %H:%M:%f', 'NOW', 'LOCALTIME')";

/// Table-level metadata
const TABLE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS data_table (
        name            VARCHAR PRIMARY KEY,
        keys            VARCHAR NOT NULL,
        path            VARCHAR NOT NULL,
        engine          VARCHAR NOT NULL DEFAULT 'SQLite3',
        source          VARCHAR,
        description     VARCHAR,
        script_file     VARCHAR,
        script_tag      VARCHAR,
        desc_file       VARCHAR,
        desc_tag        VARCHAR,
        log_file        VARCHAR,
        create_at       TIMESTAMP NOT NULL DEFAULT (STRFTIME('%Y-%m-%d %H:%M:%f', 'NOW', 'LOCALTIME')),
        modify_at       TIMESTAMP NOT NULL DEFAULT (STRFTIME('%Y-%m-%d %H:%M:%f', 'NOW', 'LOCALTIME'))
    );

    CREATE INDEX IF NOT EXISTS data_table_name ON data_table (name);
"#;

/// Record-level metadata
const RECORD_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS data_record (
        name         VARCHAR PRIMARY KEY,
        type         VARCHAR NOT NULL,
        source       VARCHAR NOT NULL DEFAULT 'unknown',
        label        VARCHAR NOT NULL,
        description  VARCHAR,
        number       INTEGER,
        missNumber   INTEGER,
        uniqueNumber INTEGER,
        script_file  VARCHAR,
        script_tag   VARCHAR,
        desc_file    VARCHAR,
        desc_tag     VARCHAR,
        log_file     VARCHAR,
        create_at    TIMESTAMP NOT NULL DEFAULT (STRFTIME('%Y-%m-%d %H:%M:%f', 'NOW', 'LOCALTIME')),
        modify_at    TIMESTAMP NOT NULL DEFAULT (STRFTIME('%Y-%m-%d %H:%M:%f', 'NOW', 'LOCALTIME'))
    );

    CREATE INDEX IF NOT EXISTS data_record_name ON data_record (name);
"#;

/// Create both relations and their indexes if they are missing.
pub fn init_schema(conn: &Connection) -> crate::error::Result<()> {
    tracing::debug!("Ensuring catalog schema");

    conn.execute_batch(TABLE_SCHEMA)?;
    conn.execute_batch(RECORD_SCHEMA)?;

    Ok(())
}

/// Names of all user relations in the catalog, sorted.
pub fn table_names(conn: &Connection) -> crate::error::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // Run twice - should be idempotent
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        assert_eq!(
            table_names(&conn).unwrap(),
            vec!["data_record".to_string(), "data_table".to_string()]
        );
    }

    #[test]
    fn test_indexes_created() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        for index in ["data_table_name", "data_record_name"] {
            let exists: i32 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?",
                    [index],
                    |r| r.get(0),
                )
                .unwrap();
            assert_eq!(exists, 1, "Index {} should exist", index);
        }
    }

    #[test]
    fn test_column_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO data_table (name, keys, path) VALUES ('db:t', 'id', '/tmp/t.sqlite')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO data_record (name, type, label) VALUES ('db:t:r', 'int', 'r')",
            [],
        )
        .unwrap();

        let (engine, create_at): (String, String) = conn
            .query_row(
                "SELECT engine, create_at FROM data_table WHERE name = 'db:t'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(engine, "SQLite3");
        // YYYY-MM-DD HH:MM:SS.sss
        assert_eq!(create_at.len(), 23);

        let source: String = conn
            .query_row(
                "SELECT source FROM data_record WHERE name = 'db:t:r'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(source, "unknown");
    }

    #[test]
    fn test_duplicate_primary_key_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let insert = "INSERT INTO data_record (name, type, label) VALUES ('db:t:r', 'int', 'r')";
        conn.execute(insert, []).unwrap();
        assert!(conn.execute(insert, []).is_err());
    }
}

//! Catalog statistics

use super::timestamp::parse_timestamp;
use crate::error::Result;
use crate::types::Stats;
use chrono::NaiveDateTime;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::path::Path;

/// Gather counts, size, engine version, last modification and the table list.
///
/// Count, version and listing failures propagate. Unreadable `modify_at`
/// values are left out of `last_updated`.
pub fn collect(conn: &Connection, path: &Path) -> Result<Stats> {
    let table_count: i64 = conn.query_row("SELECT COUNT(*) FROM data_table", [], |r| r.get(0))?;
    let record_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM data_record", [], |r| r.get(0))?;
    let sqlite_version: String = conn.query_row("SELECT sqlite_version()", [], |r| r.get(0))?;

    let last_updated = [
        last_modified(conn, "data_table"),
        last_modified(conn, "data_record"),
    ]
    .into_iter()
    .flatten()
    .max();

    let mut stmt = conn.prepare("SELECT name FROM data_table ORDER BY name")?;
    let tables_list = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;

    Ok(Stats {
        path: path.to_path_buf(),
        table_count,
        record_count,
        db_size: database_size(conn, path)?,
        last_updated,
        sqlite_version,
        tables_list,
    })
}

/// Size of the catalog file, or of the page store when there is no file
/// (in-memory catalogs).
fn database_size(conn: &Connection, path: &Path) -> Result<u64> {
    if let Ok(metadata) = std::fs::metadata(path) {
        if metadata.is_file() {
            return Ok(metadata.len());
        }
    }

    let page_count: u64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: u64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    Ok(page_count * page_size)
}

/// Latest `modify_at` of a relation, compared as parsed times.
///
/// Stored text can mix layouts and UTC offsets, so a text `MAX` would not
/// find the newest row. Unparseable values are skipped.
fn last_modified(conn: &Connection, relation: &str) -> Option<NaiveDateTime> {
    scan_modified(conn, relation)
        .map_err(|e| tracing::warn!(relation, error = %e, "Could not read last modification"))
        .ok()?
}

fn scan_modified(conn: &Connection, relation: &str) -> rusqlite::Result<Option<NaiveDateTime>> {
    let mut stmt = conn.prepare(&format!("SELECT name, modify_at FROM {relation}"))?;
    let mut rows = stmt.query([])?;

    let mut latest = None;
    while let Some(row) = rows.next()? {
        let parsed = match row.get_ref(1)? {
            ValueRef::Null => continue,
            ValueRef::Text(raw) => std::str::from_utf8(raw).ok().and_then(parse_timestamp),
            _ => None,
        };
        match parsed {
            Some(ts) => latest = latest.max(Some(ts)),
            None => {
                let name: String = row.get(0)?;
                tracing::warn!(relation, name = %name, "Skipping unreadable modify_at");
            }
        }
    }
    Ok(latest)
}

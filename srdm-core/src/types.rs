//! Core domain types for srdm
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Database** | A namespace grouping tables (first identity segment) |
//! | **Table** | Metadata describing one physical dataset and where it lives |
//! | **Record** | Metadata describing one item, column or file owned by a Table |
//! | **Identity** | The colon-joined key (`db:table` or `db:table:record`) |
//!
//! Timestamps are local wall-clock times without an offset, the same
//! convention the catalog file uses for its own column defaults.

use crate::naming::{self, Identity};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage engine label used when none is given.
pub const DEFAULT_ENGINE: &str = "SQLite3";

/// Record source used when none is given.
pub const DEFAULT_SOURCE: &str = "unknown";

/// Current local time, truncated to the millisecond precision the catalog
/// stores.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    let millis = now.nanosecond() / 1_000_000;
    now.with_nanosecond(millis * 1_000_000).unwrap_or(now)
}

// ============================================
// Table
// ============================================

/// A dataset backed by an external file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Namespace the table belongs to
    pub database: String,
    /// Table name, unique within `database`
    pub name: String,
    /// Primary-key columns of the underlying dataset (free text)
    pub keys: String,
    /// Location of the physical data file
    pub path: String,
    /// Storage technology label
    pub engine: String,
    pub source: String,
    pub description: String,
    /// Script that produced the data
    pub script_file: String,
    pub script_tag: String,
    /// Analysis/description document
    pub desc_file: String,
    pub desc_tag: String,
    /// Usage log
    pub log_file: String,
    #[serde(rename = "create_at")]
    pub created_at: NaiveDateTime,
    #[serde(rename = "modify_at")]
    pub modified_at: NaiveDateTime,
    /// Records owned by this table. Filled on read, not a stored column.
    #[serde(default)]
    pub records: Vec<Record>,
}

impl Table {
    /// A table with default engine and both timestamps set to now.
    pub fn new(database: impl Into<String>, name: impl Into<String>) -> Self {
        let ts = now();
        Self {
            database: database.into(),
            name: name.into(),
            keys: String::new(),
            path: String::new(),
            engine: DEFAULT_ENGINE.to_string(),
            source: String::new(),
            description: String::new(),
            script_file: String::new(),
            script_tag: String::new(),
            desc_file: String::new(),
            desc_tag: String::new(),
            log_file: String::new(),
            created_at: ts,
            modified_at: ts,
            records: Vec::new(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::table(self.database.clone(), self.name.clone())
    }

    /// Encoded key, `database:name`
    pub fn full_name(&self) -> String {
        naming::encode(&self.database, None, &self.name)
    }
}

// ============================================
// Record
// ============================================

/// One data item owned by a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub database: String,
    pub table: String,
    pub name: String,
    /// Free-text classification
    #[serde(rename = "type")]
    pub record_type: String,
    pub source: String,
    pub label: String,
    pub description: String,
    /// Total value count
    pub number: i64,
    /// Missing value count
    #[serde(rename = "missNumber")]
    pub miss_number: i64,
    /// Distinct value count
    #[serde(rename = "uniqueNumber")]
    pub unique_number: i64,
    pub script_file: String,
    pub script_tag: String,
    pub desc_file: String,
    pub desc_tag: String,
    pub log_file: String,
    #[serde(rename = "create_at")]
    pub created_at: NaiveDateTime,
    #[serde(rename = "modify_at")]
    pub modified_at: NaiveDateTime,
}

impl Record {
    pub fn new(
        database: impl Into<String>,
        table: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let ts = now();
        Self {
            database: database.into(),
            table: table.into(),
            name: name.into(),
            record_type: String::new(),
            source: DEFAULT_SOURCE.to_string(),
            label: String::new(),
            description: String::new(),
            number: 0,
            miss_number: 0,
            unique_number: 0,
            script_file: String::new(),
            script_tag: String::new(),
            desc_file: String::new(),
            desc_tag: String::new(),
            log_file: String::new(),
            created_at: ts,
            modified_at: ts,
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::record(
            self.database.clone(),
            self.table.clone(),
            self.name.clone(),
        )
    }

    /// Encoded key, `database:table:name`
    pub fn full_name(&self) -> String {
        naming::encode(&self.database, Some(&self.table), &self.name)
    }
}

// ============================================
// Statistics
// ============================================

/// Snapshot of catalog usage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    /// Catalog file location
    pub path: PathBuf,
    pub table_count: i64,
    pub record_count: i64,
    /// Catalog size in bytes
    pub db_size: u64,
    /// Most recent `modify_at` across tables and records; `None` when the
    /// catalog is empty
    pub last_updated: Option<NaiveDateTime>,
    pub sqlite_version: String,
    /// Table identities in ascending order
    pub tables_list: Vec<String>,
}

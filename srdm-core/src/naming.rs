//! Hierarchical identities for catalog entries
//!
//! Tables and records are keyed by a single colon-joined string:
//!
//! - Table:  `<database>:<table>`
//! - Record: `<database>:<table>:<record>`
//!
//! The key is the storage primary key, so a table's records are found by
//! prefix matching on `<database>:<table>:`.
//!
//! Search patterns use `%` as their only wildcard (any sequence of
//! characters, possibly empty). Every other character, `_` included,
//! matches itself and matching is case-sensitive.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between identity segments
pub const DELIMITER: char = ':';

/// Wildcard accepted in search patterns
pub const WILDCARD: char = '%';

/// A decoded catalog identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// `<database>:<name>`
    Table { database: String, name: String },
    /// `<database>:<table>:<name>`
    Record {
        database: String,
        table: String,
        name: String,
    },
}

impl Identity {
    pub fn table(database: impl Into<String>, name: impl Into<String>) -> Self {
        Identity::Table {
            database: database.into(),
            name: name.into(),
        }
    }

    pub fn record(
        database: impl Into<String>,
        table: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Identity::Record {
            database: database.into(),
            table: table.into(),
            name: name.into(),
        }
    }

    /// Decode an identity string.
    ///
    /// Two segments make a table identity, three a record identity.
    /// Anything else is `Malformed`.
    pub fn parse(identity: &str) -> Result<Self> {
        let segments = decode(identity);
        match segments.as_slice() {
            [database, name] => Ok(Identity::table(*database, *name)),
            [database, table, name] => Ok(Identity::record(*database, *table, *name)),
            _ => Err(Error::Malformed(format!(
                "identity '{}' has {} segments; expected 'db:table' or 'db:table:record'",
                identity,
                segments.len()
            ))),
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Identity::Table { .. })
    }

    /// Check every segment for emptiness and embedded delimiters.
    ///
    /// Applied on every write so that stored keys always decode back to
    /// the segments they were built from.
    pub fn validate(&self) -> Result<()> {
        match self {
            Identity::Table { database, name } => {
                validate_segment("database", database)?;
                validate_segment("table", name)
            }
            Identity::Record {
                database,
                table,
                name,
            } => {
                validate_segment("database", database)?;
                validate_segment("table", table)?;
                validate_segment("record", name)
            }
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Table { database, name } => write!(f, "{}", encode(database, None, name)),
            Identity::Record {
                database,
                table,
                name,
            } => write!(f, "{}", encode(database, Some(table), name)),
        }
    }
}

impl FromStr for Identity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Identity::parse(s)
    }
}

/// Join identity segments. `table` is `None` for table identities.
pub fn encode(database: &str, table: Option<&str>, name: &str) -> String {
    match table {
        Some(table) => format!("{database}{DELIMITER}{table}{DELIMITER}{name}"),
        None => format!("{database}{DELIMITER}{name}"),
    }
}

/// Split an identity into its segments. No escaping is applied.
pub fn decode(identity: &str) -> Vec<&str> {
    identity.split(DELIMITER).collect()
}

/// Prefix shared by every record owned by `table_identity`.
pub fn child_prefix(table_identity: &str) -> String {
    format!("{table_identity}{DELIMITER}")
}

/// Search pattern matching every identity that starts with `prefix`.
pub fn prefix_pattern(prefix: &str) -> String {
    format!("{prefix}{WILDCARD}")
}

/// Reject segments that are empty or contain the delimiter.
pub fn validate_segment(kind: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(Error::Malformed(format!("{kind} name must not be empty")));
    }
    if segment.contains(DELIMITER) {
        return Err(Error::Malformed(format!(
            "{kind} name '{segment}' must not contain '{DELIMITER}'"
        )));
    }
    Ok(())
}

/// Translate a `%`-pattern into an SQLite `GLOB` expression.
///
/// `%` becomes `*`; GLOB metacharacters that may legitimately appear in
/// names (`*`, `?`, `[`) are wrapped in single-character classes so they
/// match literally.
pub fn to_glob(pattern: &str) -> String {
    let mut glob = String::with_capacity(pattern.len() + 8);
    for c in pattern.chars() {
        if c == WILDCARD {
            glob.push('*');
        } else {
            push_glob_literal(&mut glob, c);
        }
    }
    glob
}

/// GLOB expression matching every record owned by `table_identity`.
///
/// The identity is matched literally, so a `%` inside a stored name is
/// not a wildcard here.
pub fn child_glob(table_identity: &str) -> String {
    let mut glob = String::with_capacity(table_identity.len() + 8);
    for c in child_prefix(table_identity).chars() {
        push_glob_literal(&mut glob, c);
    }
    glob.push('*');
    glob
}

fn push_glob_literal(glob: &mut String, c: char) {
    match c {
        '*' => glob.push_str("[*]"),
        '?' => glob.push_str("[?]"),
        '[' => glob.push_str("[[]"),
        _ => glob.push(c),
    }
}

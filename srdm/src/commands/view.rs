//! `srdm view`

use super::{write_record_detail, write_table_detail};
use anyhow::{bail, Result};
use srdm_core::Repository;
use std::io::Write;

/// Print the detail view of a table, or of a record when no table matches.
pub fn run(repo: &dyn Repository, name: &str, out: &mut dyn Write) -> Result<()> {
    if let Some(table) = repo.get_table(name)? {
        write_table_detail(out, &table)?;
        return Ok(());
    }

    if let Some(record) = repo.get_record(name)? {
        write_record_detail(out, &record)?;
        return Ok(());
    }

    bail!("not found: {name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use srdm_core::{Database, Record};

    #[test]
    fn test_view_record() {
        let db = Database::open_in_memory().unwrap();
        let mut record = Record::new("db", "t", "age");
        record.number = 7;
        db.insert_record(&record).unwrap();

        let mut out = Vec::new();
        run(&db, "db:t:age", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Record: db:t:age\n"));
        assert!(text.contains("N=7, Miss=0, Unique=0"));
    }

    #[test]
    fn test_view_missing() {
        let db = Database::open_in_memory().unwrap();
        let err = run(&db, "db:nothing", &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "not found: db:nothing");
    }
}

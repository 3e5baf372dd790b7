//! `srdm insert`

use super::EntryFields;
use anyhow::{bail, Context, Result};
use srdm_core::config::DefaultsConfig;
use srdm_core::{Identity, Record, Repository, Table};
use std::io::Write;

/// Insert a table (`db:table`) or a record (`db:table:record`).
///
/// Tables need `--keys`. Without `--data-path` the table points at
/// `<data_dir>/<db>.sqlite`; without `--engine` it gets the configured engine.
pub fn run(
    repo: &dyn Repository,
    defaults: &DefaultsConfig,
    name: &str,
    fields: &EntryFields,
    out: &mut dyn Write,
) -> Result<()> {
    match Identity::parse(name)? {
        Identity::Table { database, name } => {
            if fields.keys.as_deref().map_or(true, str::is_empty) {
                bail!("--keys is required when inserting a table");
            }

            let mut table = Table::new(database, name);
            table.engine = defaults.engine.clone();
            table.path = defaults
                .table_data_path(&table.database)
                .display()
                .to_string();
            fields.apply_to_table(&mut table);

            repo.insert_table(&table)
                .with_context(|| format!("failed to insert table {}", table.full_name()))?;
            writeln!(out, "Inserted table: {}", table.full_name())?;
        }
        Identity::Record {
            database,
            table,
            name,
        } => {
            let mut record = Record::new(database, table, name);
            fields.apply_to_record(&mut record);

            repo.insert_record(&record)
                .with_context(|| format!("failed to insert record {}", record.full_name()))?;
            writeln!(out, "Inserted record: {}", record.full_name())?;
        }
    }

    Ok(())
}

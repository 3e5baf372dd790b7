//! `srdm update`

use super::EntryFields;
use anyhow::{Context, Result};
use srdm_core::{Error, Identity, Repository};
use std::io::Write;

/// Overlay the supplied fields onto an existing table or record.
pub fn run(
    repo: &dyn Repository,
    name: &str,
    fields: &EntryFields,
    out: &mut dyn Write,
) -> Result<()> {
    let identity = Identity::parse(name)?;
    let key = identity.to_string();

    if identity.is_table() {
        let mut table = repo
            .get_table(&key)?
            .ok_or_else(|| Error::NotFound(format!("table {key}")))?;
        fields.apply_to_table(&mut table);
        repo.update_table(&table)
            .with_context(|| format!("failed to update table {key}"))?;
        writeln!(out, "Updated table: {key}")?;
    } else {
        let mut record = repo
            .get_record(&key)?
            .ok_or_else(|| Error::NotFound(format!("record {key}")))?;
        fields.apply_to_record(&mut record);
        repo.update_record(&record)
            .with_context(|| format!("failed to update record {key}"))?;
        writeln!(out, "Updated record: {key}")?;
    }

    Ok(())
}

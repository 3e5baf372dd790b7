//! `srdm info`

use anyhow::{Context, Result};
use srdm_core::format::{format_bytes, format_timestamp, format_timestamp_opt};
use srdm_core::{types, Repository};
use std::io::Write;

pub fn run(repo: &dyn Repository, out: &mut dyn Write) -> Result<()> {
    let stats = repo
        .statistics()
        .context("failed to collect catalog statistics")?;

    writeln!(out, "SRDM Catalog")?;
    writeln!(out, "============")?;
    writeln!(out)?;
    writeln!(out, "Database Path:   {}", stats.path.display())?;
    writeln!(out, "SQLite Version:  {}", stats.sqlite_version)?;
    writeln!(out, "Tables:          {}", stats.table_count)?;
    writeln!(out, "Records:         {}", stats.record_count)?;
    writeln!(out, "Size:            {}", format_bytes(stats.db_size))?;
    writeln!(
        out,
        "Last Updated:    {}",
        format_timestamp_opt(stats.last_updated.as_ref())
    )?;
    writeln!(out, "Check Time:      {}", format_timestamp(&types::now()))?;

    writeln!(out)?;
    writeln!(out, "Tables List:")?;
    if stats.tables_list.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for table in &stats.tables_list {
        writeln!(out, "  - {table}")?;
    }

    Ok(())
}

//! `srdm export`

use anyhow::{Context, Result};
use srdm_core::Repository;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pattern used when none is given: every record.
pub const DEFAULT_PATTERN: &str = "%";

/// Write every record matching `pattern` as a JSON array.
///
/// Output goes to `output_file` when given, otherwise to `out`. An empty
/// match prints a notice on stderr and writes nothing.
pub fn run(
    repo: &dyn Repository,
    pattern: &str,
    output_file: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let records = repo
        .search_records(pattern)
        .with_context(|| format!("failed to search records matching {pattern}"))?;

    if records.is_empty() {
        eprintln!("No records found to export.");
        return Ok(());
    }

    match output_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &records)?;
            writeln!(writer)?;
            writer.flush()?;

            tracing::info!(count = records.len(), path = %path.display(), "Exported records");
            writeln!(out, "Exported {} records to {}", records.len(), path.display())?;
        }
        None => {
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

//! `srdm search`
//!
//! Each name is tried as a table identity, then as a record identity, then
//! as a record prefix (`name%`). Names that match nothing are reported on
//! stderr and do not fail the command.

use super::{write_record_detail, write_table_detail};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use srdm_core::naming::prefix_pattern;
use srdm_core::{Record, Repository, Table};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Text,
}

/// Text layout; ignored for JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// One block per hit with every field
    #[default]
    Detail,
    /// Identity only
    NameOnly,
    /// Identity, kind and description on one line
    Oneline,
}

/// A table or record found by search.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Hit {
    Table(Table),
    Record(Record),
}

impl Hit {
    fn identity(&self) -> String {
        match self {
            Hit::Table(table) => table.full_name(),
            Hit::Record(record) => record.full_name(),
        }
    }
}

/// Resolve every name to hits. The second list holds names with no match.
pub fn find(repo: &dyn Repository, names: &[String]) -> Result<(Vec<Hit>, Vec<String>)> {
    let mut hits = Vec::new();
    let mut missing = Vec::new();

    for name in names {
        if let Some(table) = repo.get_table(name)? {
            hits.push(Hit::Table(table));
            continue;
        }
        if let Some(record) = repo.get_record(name)? {
            hits.push(Hit::Record(record));
            continue;
        }

        let records = repo.search_records(&prefix_pattern(name))?;
        if records.is_empty() {
            missing.push(name.clone());
        } else {
            hits.extend(records.into_iter().map(Hit::Record));
        }
    }

    tracing::debug!(hits = hits.len(), missing = missing.len(), "Search finished");
    Ok((hits, missing))
}

pub fn run(
    repo: &dyn Repository,
    names: &[String],
    format: Format,
    mode: Mode,
    output_file: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let (hits, missing) = find(repo, names)?;
    for name in &missing {
        eprintln!("not found: {name}");
    }

    match output_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_hits(&mut writer, &hits, format, mode)?;
            writer.flush()?;
            writeln!(out, "Wrote {} results to {}", hits.len(), path.display())?;
        }
        None => write_hits(out, &hits, format, mode)?,
    }

    Ok(())
}

fn write_hits(out: &mut dyn Write, hits: &[Hit], format: Format, mode: Mode) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, hits)?;
            writeln!(out)?;
        }
        Format::Text => {
            for hit in hits {
                match (mode, hit) {
                    (Mode::Detail, Hit::Table(table)) => write_table_detail(out, table)?,
                    (Mode::Detail, Hit::Record(record)) => write_record_detail(out, record)?,
                    (Mode::NameOnly, hit) => writeln!(out, "{}", hit.identity())?,
                    (Mode::Oneline, Hit::Table(table)) => writeln!(
                        out,
                        "{}\ttable\t{}\t{}",
                        table.full_name(),
                        table.engine,
                        table.description
                    )?,
                    (Mode::Oneline, Hit::Record(record)) => writeln!(
                        out,
                        "{}\trecord\t{}\t{}",
                        record.full_name(),
                        record.record_type,
                        record.description
                    )?,
                }
            }
        }
    }
    Ok(())
}

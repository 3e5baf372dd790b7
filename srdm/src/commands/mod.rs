//! Subcommand implementations.
//!
//! Every command talks to the catalog through [`Repository`] and writes its
//! normal output to the supplied writer, so tests can run them against an
//! in-memory catalog and inspect what was printed.

pub mod delete;
pub mod export;
pub mod get;
pub mod info;
pub mod insert;
pub mod ping;
pub mod search;
pub mod update;
pub mod view;

use clap::Args;
use srdm_core::{Record, Table};
use std::io::Write;

/// Field flags shared by `insert` and `update`.
///
/// Table-only flags are ignored for records and vice versa.
#[derive(Args, Debug, Default, Clone)]
pub struct EntryFields {
    /// Primary keys of the table (table only)
    #[arg(long)]
    pub keys: Option<String>,

    /// Data management engine (table only)
    #[arg(long)]
    pub engine: Option<String>,

    /// Data storage path (table only)
    #[arg(long = "data-path")]
    pub data_path: Option<String>,

    /// Data source
    #[arg(long)]
    pub source: Option<String>,

    /// Data description
    #[arg(long)]
    pub description: Option<String>,

    /// Data processing script file
    #[arg(long = "script-file", alias = "script_file")]
    pub script_file: Option<String>,

    /// Script file version tag
    #[arg(long = "script-tag", alias = "script_tag")]
    pub script_tag: Option<String>,

    /// Data analysis file
    #[arg(long = "desc-file", alias = "desc_file")]
    pub desc_file: Option<String>,

    /// Analysis file version tag
    #[arg(long = "desc-tag", alias = "desc_tag")]
    pub desc_tag: Option<String>,

    /// Data usage log file
    #[arg(long = "log-file", alias = "log_file")]
    pub log_file: Option<String>,

    /// Record type (record only)
    #[arg(long = "type")]
    pub record_type: Option<String>,

    /// Data label (record only)
    #[arg(long)]
    pub label: Option<String>,

    /// Number of values (record only)
    #[arg(long)]
    pub number: Option<i64>,

    /// Number of missing values (record only)
    #[arg(long = "miss-number", alias = "missNumber")]
    pub miss_number: Option<i64>,

    /// Number of unique values (record only)
    #[arg(long = "unique-number", alias = "uniqueNumber")]
    pub unique_number: Option<i64>,
}

fn overlay<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl EntryFields {
    /// Copy every supplied table field onto `table`.
    pub fn apply_to_table(&self, table: &mut Table) {
        overlay(&mut table.keys, &self.keys);
        overlay(&mut table.engine, &self.engine);
        overlay(&mut table.path, &self.data_path);
        overlay(&mut table.source, &self.source);
        overlay(&mut table.description, &self.description);
        overlay(&mut table.script_file, &self.script_file);
        overlay(&mut table.script_tag, &self.script_tag);
        overlay(&mut table.desc_file, &self.desc_file);
        overlay(&mut table.desc_tag, &self.desc_tag);
        overlay(&mut table.log_file, &self.log_file);
    }

    /// Copy every supplied record field onto `record`.
    pub fn apply_to_record(&self, record: &mut Record) {
        overlay(&mut record.record_type, &self.record_type);
        overlay(&mut record.source, &self.source);
        overlay(&mut record.label, &self.label);
        overlay(&mut record.description, &self.description);
        overlay(&mut record.number, &self.number);
        overlay(&mut record.miss_number, &self.miss_number);
        overlay(&mut record.unique_number, &self.unique_number);
        overlay(&mut record.script_file, &self.script_file);
        overlay(&mut record.script_tag, &self.script_tag);
        overlay(&mut record.desc_file, &self.desc_file);
        overlay(&mut record.desc_tag, &self.desc_tag);
        overlay(&mut record.log_file, &self.log_file);
    }
}

/// Multi-line detail view of a table.
pub(crate) fn write_table_detail(out: &mut dyn Write, table: &Table) -> std::io::Result<()> {
    writeln!(out, "Table: {}", table.full_name())?;
    writeln!(out, "  Database:    {}", table.database)?;
    writeln!(out, "  Name:        {}", table.name)?;
    writeln!(out, "  Keys:        {}", table.keys)?;
    writeln!(out, "  Path:        {}", table.path)?;
    writeln!(out, "  Engine:      {}", table.engine)?;
    writeln!(out, "  Description: {}", table.description)?;
    writeln!(out, "  Source:      {}", table.source)?;
    write_provenance(
        out,
        [
            ("Script", &table.script_file, &table.script_tag),
            ("Desc", &table.desc_file, &table.desc_tag),
        ],
        &table.log_file,
    )?;
    writeln!(out, "  CreateAt:    {}", table.created_at)?;
    writeln!(out, "  ModifyAt:    {}", table.modified_at)?;
    writeln!(out, "  Records:     {}", table.records.len())
}

/// Multi-line detail view of a record.
pub(crate) fn write_record_detail(out: &mut dyn Write, record: &Record) -> std::io::Result<()> {
    writeln!(out, "Record: {}", record.full_name())?;
    writeln!(out, "  Database:    {}", record.database)?;
    writeln!(out, "  Table:       {}", record.table)?;
    writeln!(out, "  Name:        {}", record.name)?;
    writeln!(out, "  Type:        {}", record.record_type)?;
    writeln!(out, "  Label:       {}", record.label)?;
    writeln!(out, "  Source:      {}", record.source)?;
    writeln!(out, "  Description: {}", record.description)?;
    writeln!(
        out,
        "  Stats:       N={}, Miss={}, Unique={}",
        record.number, record.miss_number, record.unique_number
    )?;
    write_provenance(
        out,
        [
            ("Script", &record.script_file, &record.script_tag),
            ("Desc", &record.desc_file, &record.desc_tag),
        ],
        &record.log_file,
    )?;
    writeln!(out, "  CreateAt:    {}", record.created_at)?;
    writeln!(out, "  ModifyAt:    {}", record.modified_at)
}

/// Provenance lines are only shown when set.
fn write_provenance(
    out: &mut dyn Write,
    files: [(&str, &String, &String); 2],
    log_file: &str,
) -> std::io::Result<()> {
    for (label, file, tag) in files {
        if file.is_empty() {
            continue;
        }
        let label = format!("{label}File:");
        if tag.is_empty() {
            writeln!(out, "  {label:<13}{file}")?;
        } else {
            writeln!(out, "  {label:<13}{file} ({tag})")?;
        }
    }
    if !log_file.is_empty() {
        writeln!(out, "  LogFile:     {log_file}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_only_supplied_fields() {
        let mut record = Record::new("db", "t", "r");
        record.label = "old".to_string();
        record.number = 10;

        let fields = EntryFields {
            label: Some("new".to_string()),
            miss_number: Some(0),
            keys: Some("ignored for records".to_string()),
            ..Default::default()
        };
        fields.apply_to_record(&mut record);

        assert_eq!(record.label, "new");
        assert_eq!(record.number, 10);
        assert_eq!(record.miss_number, 0);
        assert_eq!(record.source, "unknown");
    }

    #[test]
    fn test_table_detail_shows_provenance() {
        let mut table = Table::new("db", "t");
        table.script_file = "build.py".to_string();
        table.script_tag = "v2".to_string();

        let mut out = Vec::new();
        write_table_detail(&mut out, &table).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Table: db:t"));
        assert!(text.contains("ScriptFile:  build.py (v2)"));
        assert!(!text.contains("DescFile:"));
        assert!(text.contains("Records:     0"));
    }
}

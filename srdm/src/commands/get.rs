//! `srdm get`

use anyhow::{bail, Context, Result};
use srdm_core::Repository;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Copy the data file a table points at.
///
/// The copy lands at `output`, or in the working directory under the data
/// file's own name.
pub fn run(
    repo: &dyn Repository,
    name: &str,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(table) = repo.get_table(name)? else {
        bail!("resource not found or extraction not supported for this type: {name}");
    };

    let source = PathBuf::from(&table.path);
    let metadata = std::fs::metadata(&source)
        .with_context(|| format!("cannot read data file {}", source.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a regular file", source.display());
    }

    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => match source.file_name() {
            Some(file_name) => PathBuf::from(file_name),
            None => bail!("cannot derive a file name from {}", source.display()),
        },
    };

    let bytes = std::fs::copy(&source, &destination).with_context(|| {
        format!(
            "failed to copy {} to {}",
            source.display(),
            destination.display()
        )
    })?;

    tracing::info!(identity = %name, bytes, destination = %destination.display(), "Extracted data file");
    writeln!(out, "Extracted to {}", destination.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use srdm_core::{Database, Record, Table};

    fn table_at(db: &Database, path: &Path) {
        let mut table = Table::new("db", "t");
        table.keys = "id".to_string();
        table.path = path.display().to_string();
        db.insert_table(&table).unwrap();
    }

    #[test]
    fn test_get_copies_data_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("db.sqlite");
        std::fs::write(&source, b"payload").unwrap();
        let destination = dir.path().join("copy.sqlite");

        let db = Database::open_in_memory().unwrap();
        table_at(&db, &source);

        let mut out = Vec::new();
        run(&db, "db:t", Some(&destination), &mut out).unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"payload");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Extracted to {}\n", destination.display())
        );
    }

    #[test]
    fn test_get_rejects_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        table_at(&db, dir.path());

        let err = run(&db, "db:t", Some(&dir.path().join("x")), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("is not a regular file"));
    }

    #[test]
    fn test_get_record_not_supported() {
        let db = Database::open_in_memory().unwrap();
        db.insert_record(&Record::new("db", "t", "r")).unwrap();

        let err = run(&db, "db:t:r", None, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("resource not found"));
    }
}

//! `srdm delete`

use anyhow::{Context, Result};
use srdm_core::Repository;
use std::io::Write;

/// Delete each identity in order, stopping at the first failure.
///
/// Deleting a table needs `force`, which removes its records as well.
pub fn run(
    repo: &dyn Repository,
    names: &[String],
    force: bool,
    out: &mut dyn Write,
) -> Result<()> {
    for name in names {
        repo.delete(name, force)
            .with_context(|| format!("failed to delete {name}"))?;
        writeln!(out, "Deleted: {name}")?;
    }
    Ok(())
}

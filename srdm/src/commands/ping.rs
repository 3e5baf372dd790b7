//! `srdm test`

use anyhow::{Context, Result};
use srdm_core::Repository;
use std::io::Write;

/// Check that the catalog answers a trivial query.
pub fn run(repo: &dyn Repository, out: &mut dyn Write) -> Result<()> {
    repo.ping().context("database connection failed")?;

    writeln!(out, "Database connection successful!")?;
    writeln!(out, "Database path: {}", repo.path().display())?;
    Ok(())
}

//! Database layer for srdm
//!
//! This module provides the catalog storage using SQLite with:
//! - Idempotent schema creation
//! - The [`Repository`] trait and its SQLite implementation, [`Database`]
//! - Statistics collection

pub mod repo;
pub mod schema;
pub mod stats;
pub mod timestamp;

pub use repo::{Database, Repository};

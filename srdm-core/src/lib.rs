//! # srdm-core
//!
//! Core library for srdm - a personal research-data catalog.
//!
//! This library provides:
//! - Domain types for tables, records and catalog statistics
//! - The hierarchical naming scheme (`db:table[:record]`) used as storage keys
//! - Catalog storage with SQLite behind the [`Repository`] trait
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use srdm_core::{Config, Database, Repository, Table};
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::open(&config.database_path(None)).expect("failed to open catalog");
//!
//! let mut table = Table::new("genomics", "samples");
//! table.keys = "sample_id".to_string();
//! db.insert_table(&table).expect("failed to insert table");
//!
//! let stored = db.get_table("genomics:samples").expect("lookup failed");
//! assert!(stored.is_some());
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::{Database, Repository};
pub use error::{Error, ErrorKind, Result};
pub use naming::Identity;
pub use types::*;

// Public modules
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod naming;
pub mod types;

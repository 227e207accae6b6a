//! Rule catalog configuration for the TDS engine.
//!
//! This module loads the table of withholding provisions from YAML, either
//! the copy compiled into the crate or an alternative file on disk.
//!
//! # Example
//!
//! ```
//! use tds_engine::config::RuleCatalog;
//!
//! let catalog = RuleCatalog::builtin().unwrap();
//! println!("Loaded {} rules", catalog.len());
//! ```

mod loader;
mod types;

pub use loader::RuleCatalog;
pub use types::{CatalogDocument, CatalogMetadata};

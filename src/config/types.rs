//! Catalog file types.
//!
//! This module contains the structures deserialized from a rule catalog YAML
//! document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TdsRule;

/// Metadata about the catalog.
///
/// Identifies which version of the statute the rule table encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    /// The human-readable name of the rate chart.
    pub name: String,
    /// The version label of the rate chart.
    pub version: String,
    /// The date from which these rates apply.
    pub effective_date: NaiveDate,
    /// The statute the chart is drawn from.
    pub source: String,
}

/// A catalog document as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    /// Catalog metadata.
    pub metadata: CatalogMetadata,
    /// The rules, in catalog order.
    pub rules: Vec<TdsRule>,
}

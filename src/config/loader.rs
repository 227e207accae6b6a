//! Rule catalog loading.
//!
//! This module provides the [`RuleCatalog`] type, the immutable table of
//! withholding provisions the engine filters and computes over.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{FormulaKind, PayeeStatus, RateUnit, TdsRule};

use super::types::{CatalogDocument, CatalogMetadata};

/// The catalog compiled into the crate.
const BUILTIN_CATALOG: &str = include_str!("../../config/tds_rules.yaml");

/// Label used in errors raised while parsing the compiled-in catalog.
const BUILTIN_CATALOG_PATH: &str = "<builtin>/tds_rules.yaml";

/// The immutable, ordered collection of TDS rules.
///
/// A catalog is loaded once and only ever read afterwards. It has no mutation
/// operations; filtering and grouping are done by the calculation functions,
/// which borrow rules from it.
///
/// # Example
///
/// ```
/// use tds_engine::config::RuleCatalog;
///
/// let catalog = RuleCatalog::builtin()?;
/// assert!(!catalog.is_empty());
/// println!("Loaded {} ({})", catalog.metadata().name, catalog.metadata().version);
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCatalog {
    metadata: CatalogMetadata,
    rules: Vec<TdsRule>,
}

impl RuleCatalog {
    /// Loads the catalog compiled into the crate from `config/tds_rules.yaml`.
    pub fn builtin() -> EngineResult<Self> {
        Self::parse(BUILTIN_CATALOG, BUILTIN_CATALOG_PATH)
    }

    /// Loads a catalog from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns the catalog on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or missing fields (`ConfigParseError`)
    /// - A rule breaks a catalog invariant (`InvalidCatalog`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tds_engine::config::RuleCatalog;
    ///
    /// let catalog = RuleCatalog::load("./config/tds_rules.yaml")?;
    /// # Ok::<(), tds_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses and validates a catalog held in memory.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        let document: CatalogDocument =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        validate_rules(&document.rules)?;

        debug!(
            path,
            version = %document.metadata.version,
            rules = document.rules.len(),
            "Loaded TDS rule catalog"
        );

        Ok(Self {
            metadata: document.metadata,
            rules: document.rules,
        })
    }

    /// Returns the catalog metadata.
    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Returns every rule in catalog order.
    pub fn rules(&self) -> &[TdsRule] {
        &self.rules
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the catalog holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn invalid(rule: &TdsRule, message: &str) -> EngineError {
    EngineError::InvalidCatalog {
        rule_id: rule.id.clone(),
        message: message.to_string(),
    }
}

/// Checks the invariants every catalog must hold before the engine sees it.
fn validate_rules(rules: &[TdsRule]) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(rules.len());

    for rule in rules {
        if rule.id.trim().is_empty() {
            return Err(invalid(rule, "id must not be empty"));
        }
        if !seen.insert(rule.id.as_str()) {
            return Err(invalid(rule, "duplicate id"));
        }
        if rule.threshold < Decimal::ZERO {
            return Err(invalid(rule, "threshold must not be negative"));
        }
        if rule.rate < Decimal::ZERO {
            return Err(invalid(rule, "rate must not be negative"));
        }
        if rule.is_complex && rule.special_note.is_none() {
            return Err(invalid(rule, "complex rules must carry a special_note"));
        }
        if rule.formula != FormulaKind::Standard && rule.rate_unit != RateUnit::Percentage {
            return Err(invalid(rule, "excess and tiered formulas need a percentage rate"));
        }
        if rule.formula == FormulaKind::TieredCashWithdrawal
            && rule.payee_type != PayeeStatus::Resident
        {
            return Err(invalid(rule, "cash withdrawal rules apply to residents only"));
        }
    }

    Ok(())
}

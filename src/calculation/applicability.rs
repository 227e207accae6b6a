//! Rule applicability: filtering, lookup and grouping.
//!
//! These functions never modify the catalog. They borrow rules from it and
//! return views in the order pickers rely on.

use serde::Serialize;

use crate::config::RuleCatalog;
use crate::models::{PayeeProfile, TdsRule};

/// Rules sharing a category, as shown in one section of a grouped picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleGroup<'a> {
    /// The shared category label.
    pub category: &'a str,
    /// The rules in this category, in input order.
    pub rules: Vec<&'a TdsRule>,
}

/// Returns every rule applicable to the given payee/payer combination.
///
/// Resident payees see rules for their payer's category plus rules open to
/// all payers; non-resident payees see every non-resident rule. The result is
/// stable-sorted by category, then description.
///
/// An empty vector means no provision is listed for this combination.
///
/// # Examples
///
/// ```
/// use tds_engine::calculation::filter_applicable_rules;
/// use tds_engine::config::RuleCatalog;
/// use tds_engine::models::{PayeeProfile, PayeeStatus};
///
/// let catalog = RuleCatalog::builtin()?;
/// let rules = filter_applicable_rules(&catalog, PayeeProfile::NonResident);
/// assert!(rules.iter().all(|r| r.payee_type == PayeeStatus::NonResident));
/// # Ok::<(), tds_engine::error::EngineError>(())
/// ```
pub fn filter_applicable_rules(catalog: &RuleCatalog, profile: PayeeProfile) -> Vec<&TdsRule> {
    let mut rules: Vec<&TdsRule> = catalog
        .rules()
        .iter()
        .filter(|rule| rule.applies_to(profile.status(), profile.payer()))
        .collect();

    rules.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.description.cmp(&b.description))
    });

    rules
}

/// Looks a rule up by id in the unfiltered catalog.
///
/// Returns `None` when no rule has that id; the caller must treat this as an
/// invalid selection rather than substitute another rule.
pub fn find_rule_by_id<'a>(catalog: &'a RuleCatalog, id: &str) -> Option<&'a TdsRule> {
    catalog.rules().iter().find(|rule| rule.id == id)
}

/// Resolves a selected rule id against the rules applicable to `profile`.
///
/// A rule that exists but no longer applies (for example after the payee
/// status changed) is reported as `None`, so stale selections are caught.
pub fn find_applicable_rule<'a>(
    catalog: &'a RuleCatalog,
    profile: PayeeProfile,
    id: &str,
) -> Option<&'a TdsRule> {
    find_rule_by_id(catalog, id).filter(|rule| rule.applies_to(profile.status(), profile.payer()))
}

/// Groups rules by category, keeping first-seen category order and the input
/// order of rules within each group.
pub fn group_by_category<'a>(rules: &[&'a TdsRule]) -> Vec<RuleGroup<'a>> {
    let mut groups: Vec<RuleGroup<'a>> = Vec::new();

    for &rule in rules {
        match groups.iter_mut().find(|g| g.category == rule.category) {
            Some(group) => group.rules.push(rule),
            None => groups.push(RuleGroup {
                category: rule.category.as_str(),
                rules: vec![rule],
            }),
        }
    }

    groups
}

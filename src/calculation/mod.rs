//! Calculation logic for the TDS engine.
//!
//! This module contains rule applicability (filtering the catalog for a
//! payee/payer combination, looking rules up, grouping them for pickers) and
//! the computation of TDS for a chosen rule: the threshold gate, the standard
//! full-amount formula, the excess-only formulas for goods purchases and
//! capital gains, and the tiered cash-withdrawal formula.

mod applicability;
mod cash_withdrawal;
mod compute;
mod excess_only;
mod standard;
mod statutory;

pub use applicability::{
    RuleGroup, filter_applicable_rules, find_applicable_rule, find_rule_by_id, group_by_category,
};
pub use cash_withdrawal::{cash_withdrawal_deduction, cash_withdrawal_threshold};
pub use compute::{Deduction, calculate, compute};
pub use excess_only::excess_deduction;
pub use standard::standard_deduction;
pub use statutory::{
    CASH_WITHDRAWAL_NON_FILER_HIGHER_RATE, CASH_WITHDRAWAL_RATE, FIFTY_LAKH,
    LTCG_EXEMPTION_LIMIT, ONE_CRORE, TWENTY_LAKH, excess_over, percent_of,
};

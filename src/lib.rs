//! Tax Deducted at Source (TDS) engine.
//!
//! This crate selects the withholding provisions applicable to a payee/payer
//! combination from a versioned rule catalog, and computes the TDS due on a
//! payment under a chosen provision, including the tiered and excess-only
//! special cases.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

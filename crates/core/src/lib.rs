//! Core logic for recording balanced ledger entries.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence and lookups are reached through the traits in `ledger::ports`.
//!
//! # Modules
//!
//! - `ledger` - Double-entry entry drafting, balance, validation, submission
//! - `fields` - Typed custom-field values for CRM records

pub mod fields;
pub mod ledger;

//! Double-entry ledger entry (lançamento) drafting.
//!
//! This module implements the entry form's logic:
//! - Entry draft state and line mutation
//! - Balance calculation
//! - Submission-time validation
//! - Submission state machine
//! - Recent-movements preview
//! - Reference data for selectors
//! - Collaborator traits for persistence and lookups

pub mod balance;
pub mod catalog;
pub mod draft;
pub mod error;
pub mod movements;
pub mod ports;
pub mod session;
pub mod types;
pub mod validation;

#[cfg(test)]
mod draft_props;

pub use balance::{BalanceIndicator, BalanceResult, compute_balance};
pub use catalog::{Account, Catalog, Description};
pub use draft::{EntryDraft, MIN_LINES};
pub use error::LedgerError;
pub use movements::{Movement, MovementsPreview, MovementsTicket};
pub use ports::{EntryStore, MovementsLookup};
pub use session::{EntrySession, SessionState};
pub use types::{
    EntryKind, EntryPayload, LineItem, LineUpdate, PayloadLine, PersistedEntry, PersistedLine,
};
pub use validation::{FieldKey, ValidationErrors, ValidationIssue, validate};

//! Ledger domain types for entry drafting and persistence.
//!
//! This module defines the line items that make up a double-entry
//! transaction, the shape in which an existing entry is loaded for editing,
//! and the payload handed to persistence once an entry validates.

use chrono::NaiveDate;
use lancamento_shared::types::{AccountId, AmountInput, DescriptionId, EntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Entry kind: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl EntryKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One leg (partida) of a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The account debited or credited; unset until chosen.
    pub account: Option<AccountId>,
    /// Whether this is a debit or credit line.
    pub kind: EntryKind,
    /// Non-negative amount. Zero is allowed while editing.
    pub amount: Decimal,
}

impl LineItem {
    /// A line with no account and a zero amount.
    #[must_use]
    pub fn blank(kind: EntryKind) -> Self {
        Self {
            account: None,
            kind,
            amount: Decimal::ZERO,
        }
    }

}

/// A change to a single field of a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum LineUpdate {
    /// Select or clear the account.
    Account(Option<AccountId>),
    /// Move the line to the other side.
    Kind(EntryKind),
    /// Replace the amount; text is parsed leniently.
    Amount(AmountInput),
}

/// A line of an entry as loaded from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLine {
    /// The account, if the stored line has one.
    #[serde(default)]
    pub account: Option<AccountId>,
    /// Debit or credit.
    pub kind: EntryKind,
    /// Stored amount in whatever shape the backend sent it.
    #[serde(default)]
    pub amount: AmountInput,
}

/// An existing entry loaded for editing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistedEntry {
    /// The backend identifier; absent when the record is only a template.
    #[serde(default)]
    pub id: Option<EntryId>,
    /// The entry date.
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
    /// The chosen description (histórico).
    #[serde(default)]
    pub description: Option<DescriptionId>,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// The stored lines.
    #[serde(default)]
    pub line_items: Vec<PersistedLine>,
}

/// A fully specified line ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadLine {
    /// The account posted to.
    pub account: AccountId,
    /// Debit or credit.
    pub kind: EntryKind,
    /// Positive amount.
    pub amount: Decimal,
}

/// A validated entry handed to the persistence collaborator.
///
/// Only produced from a draft whose validation came back empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPayload {
    /// The entry date.
    pub entry_date: NaiveDate,
    /// The chosen description.
    pub description: DescriptionId,
    /// Optional note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// The balanced lines.
    pub line_items: Vec<PayloadLine>,
}

impl EntryPayload {
    /// Total debited (equal to the total credited).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.line_items
            .iter()
            .filter(|line| line.kind == EntryKind::Debit)
            .map(|line| line.amount)
            .sum()
    }
}

//! Submission-time validation of an entry draft.
//!
//! Validation runs only when the user tries to submit. Every check runs and
//! every problem is collected, so one attempt surfaces all of them.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::balance::compute_balance;
use super::draft::EntryDraft;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// No entry date.
    #[error("date is required")]
    MissingDate,

    /// No description selected.
    #[error("description is required")]
    MissingDescription,

    /// Debits and credits differ, or both are zero.
    #[error("total debits must equal total credits")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// A total is too large to represent.
    #[error("line totals are too large")]
    TotalsOutOfRange,

    /// A line has no account.
    #[error("account is required")]
    MissingAccount,

    /// A line amount is zero or negative.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
}

/// The form field a validation problem is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    /// The entry date.
    Date,
    /// The description selector.
    Description,
    /// The line-items section as a whole (balance).
    Lines,
    /// The account of the line at the given index.
    LineAccount(usize),
    /// The amount of the line at the given index.
    LineAmount(usize),
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Description => write!(f, "description"),
            Self::Lines => write!(f, "lines"),
            Self::LineAccount(index) => write!(f, "line_{index}_account"),
            Self::LineAmount(index) => write!(f, "line_{index}_amount"),
        }
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Field-keyed validation problems. Empty means the draft can be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldKey, ValidationIssue>);

impl ValidationErrors {
    /// Returns true if there is nothing to report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of problems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the problem recorded for a field.
    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&ValidationIssue> {
        self.0.get(&key)
    }

    /// Returns true if a problem is recorded for a field.
    #[must_use]
    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Returns the message for a field.
    #[must_use]
    pub fn message(&self, key: FieldKey) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    /// Iterates over fields and problems in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &ValidationIssue)> {
        self.0.iter().map(|(key, issue)| (*key, issue))
    }

    /// Rendered field keys (`date`, `line_0_account`, ...).
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.keys().map(ToString::to_string).collect()
    }

    fn insert(&mut self, key: FieldKey, issue: ValidationIssue) {
        self.0.insert(key, issue);
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, issue) in &self.0 {
            map.serialize_entry(key, &issue.to_string())?;
        }
        map.end()
    }
}

/// Validates a draft for submission.
///
/// Checks, all of which run:
/// 1. an entry date is set
/// 2. a description is selected
/// 3. the lines balance (see [`compute_balance`])
/// 4. every line has an account and a positive amount
#[must_use]
pub fn validate(draft: &EntryDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.entry_date().is_none() {
        errors.insert(FieldKey::Date, ValidationIssue::MissingDate);
    }

    if draft.description().is_none() {
        errors.insert(FieldKey::Description, ValidationIssue::MissingDescription);
    }

    let balance = compute_balance(draft.line_items());
    if balance.overflowed {
        errors.insert(FieldKey::Lines, ValidationIssue::TotalsOutOfRange);
    } else if !balance.is_balanced {
        errors.insert(
            FieldKey::Lines,
            ValidationIssue::Unbalanced {
                debit: balance.total_debit,
                credit: balance.total_credit,
            },
        );
    }

    for (index, line) in draft.line_items().iter().enumerate() {
        if line.account.is_none() {
            errors.insert(FieldKey::LineAccount(index), ValidationIssue::MissingAccount);
        }
        if line.amount <= Decimal::ZERO {
            errors.insert(FieldKey::LineAmount(index), ValidationIssue::NonPositiveAmount);
        }
    }

    errors
}

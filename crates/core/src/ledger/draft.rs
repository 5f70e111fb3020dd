//! In-memory entry draft and its mutation operations.
//!
//! A draft is created fresh or copied from a persisted entry, edited through
//! the operations below, and discarded once it has been saved. It always
//! holds at least [`MIN_LINES`] lines.

use chrono::{Local, NaiveDate};
use lancamento_shared::types::DescriptionId;
use serde::Serialize;
use tracing::debug;

use super::balance::{BalanceResult, compute_balance};
use super::types::{EntryKind, EntryPayload, LineItem, LineUpdate, PayloadLine, PersistedEntry};
use super::validation::{ValidationErrors, validate};

/// Minimum number of lines a draft keeps while editing.
pub const MIN_LINES: usize = 2;

/// A ledger entry (lançamento) being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDraft {
    entry_date: Option<NaiveDate>,
    description: Option<DescriptionId>,
    note: Option<String>,
    line_items: Vec<LineItem>,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryDraft {
    /// A fresh draft dated today.
    #[must_use]
    pub fn new() -> Self {
        Self::fresh(today())
    }

    /// A fresh draft: one blank debit line, one blank credit line.
    #[must_use]
    pub fn fresh(entry_date: NaiveDate) -> Self {
        Self {
            entry_date: Some(entry_date),
            description: None,
            note: None,
            line_items: vec![
                LineItem::blank(EntryKind::Debit),
                LineItem::blank(EntryKind::Credit),
            ],
        }
    }

    /// A draft copied from an existing entry (edit mode).
    #[must_use]
    pub fn from_persisted(entry: &PersistedEntry) -> Self {
        let mut draft = Self::fresh(today());
        draft.load(entry);
        draft
    }

    /// Resets the draft, either to a fresh one dated today or to a copy of
    /// `initial`.
    pub fn reset(&mut self, initial: Option<&PersistedEntry>) {
        self.reset_on(initial, today());
    }

    /// Like [`reset`](Self::reset) with an explicit "today".
    pub fn reset_on(&mut self, initial: Option<&PersistedEntry>, today: NaiveDate) {
        match initial {
            Some(entry) => self.load(entry),
            None => *self = Self::fresh(today),
        }
    }

    fn load(&mut self, entry: &PersistedEntry) {
        self.entry_date = entry.entry_date;
        self.description = entry.description;
        self.note.clone_from(&entry.note);
        self.line_items = entry
            .line_items
            .iter()
            .map(|line| LineItem {
                account: line.account,
                kind: line.kind,
                amount: line.amount.coerce(),
            })
            .collect();

        while self.line_items.len() < MIN_LINES {
            let has_debit = self.line_items.iter().any(|l| l.kind == EntryKind::Debit);
            let kind = if has_debit { EntryKind::Credit } else { EntryKind::Debit };
            self.line_items.push(LineItem::blank(kind));
        }
    }

    /// Appends a blank line of the given kind and returns its index.
    pub fn add_line(&mut self, kind: EntryKind) -> usize {
        self.line_items.push(LineItem::blank(kind));
        self.line_items.len() - 1
    }

    /// Removes the line at `index`.
    ///
    /// Does nothing when only [`MIN_LINES`] lines remain or the index is out
    /// of range. Returns whether a line was removed.
    pub fn remove_line(&mut self, index: usize) -> bool {
        if self.line_items.len() <= MIN_LINES || index >= self.line_items.len() {
            debug!(index, lines = self.line_items.len(), "Line removal ignored");
            return false;
        }
        self.line_items.remove(index);
        true
    }

    /// Applies a change to the line at `index`.
    ///
    /// Amounts are coerced: unparseable or negative input becomes zero.
    /// Returns false if the index is out of range.
    pub fn update_line(&mut self, index: usize, update: LineUpdate) -> bool {
        let Some(line) = self.line_items.get_mut(index) else {
            return false;
        };

        match update {
            LineUpdate::Account(account) => line.account = account,
            LineUpdate::Kind(kind) => line.kind = kind,
            LineUpdate::Amount(input) => line.amount = input.coerce(),
        }
        true
    }

    /// Sets or clears the entry date.
    pub fn set_date(&mut self, entry_date: Option<NaiveDate>) {
        self.entry_date = entry_date;
    }

    /// Selects or clears the description.
    pub fn set_description(&mut self, description: Option<DescriptionId>) {
        self.description = description;
    }

    /// Sets the note as typed.
    pub fn set_note(&mut self, note: &str) {
        self.note = Some(note.to_string());
    }

    /// The entry date.
    #[must_use]
    pub fn entry_date(&self) -> Option<NaiveDate> {
        self.entry_date
    }

    /// The selected description.
    #[must_use]
    pub fn description(&self) -> Option<DescriptionId> {
        self.description
    }

    /// The note, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Lines of one kind with their indices, in insertion order.
    pub fn lines_of(&self, kind: EntryKind) -> impl Iterator<Item = (usize, &LineItem)> {
        self.line_items
            .iter()
            .enumerate()
            .filter(move |(_, line)| line.kind == kind)
    }

    /// Current debit/credit totals.
    #[must_use]
    pub fn balance(&self) -> BalanceResult {
        compute_balance(&self.line_items)
    }

    /// Runs submission validation.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        validate(self)
    }

    /// Builds the persistence payload, or returns every validation problem.
    pub fn to_payload(&self) -> Result<EntryPayload, ValidationErrors> {
        let errors = self.validate();
        let (Some(entry_date), Some(description), true) =
            (self.entry_date, self.description, errors.is_empty())
        else {
            return Err(errors);
        };

        let line_items = self
            .line_items
            .iter()
            .map(|line| {
                line.account.map(|account| PayloadLine {
                    account,
                    kind: line.kind,
                    amount: line.amount,
                })
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(errors)?;

        Ok(EntryPayload {
            entry_date,
            description,
            note: normalize_note(self.note.as_deref()),
            line_items,
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

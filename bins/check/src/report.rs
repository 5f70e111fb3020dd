//! Human- and machine-readable check report for one entry.

use std::fmt::Write as _;

use lancamento_core::ledger::{Catalog, EntryDraft, EntryKind, ValidationErrors};
use lancamento_shared::types::format_amount;
use serde::Serialize;

/// One line of the report.
#[derive(Debug, Serialize)]
pub struct ReportLine {
    /// Position in the draft.
    pub index: usize,
    /// Debit or credit.
    pub kind: EntryKind,
    /// Account label, or the raw id when the catalog does not know it.
    pub account: Option<String>,
    /// Formatted amount.
    pub amount: String,
}

/// Balance and validation outcome of an entry.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Entry date, if set.
    pub entry_date: Option<String>,
    /// Description label or id.
    pub description: Option<String>,
    /// Lines, debits first.
    pub lines: Vec<ReportLine>,
    /// Formatted debit total.
    pub total_debit: String,
    /// Formatted credit total.
    pub total_credit: String,
    /// Balance indicator text.
    pub balance: String,
    /// Every validation problem.
    pub errors: ValidationErrors,
}

impl Report {
    /// Builds the report for `draft`.
    pub fn build(draft: &EntryDraft, catalog: &Catalog, scale: u32) -> Self {
        let balance = draft.balance();
        let lines = [EntryKind::Debit, EntryKind::Credit]
            .into_iter()
            .flat_map(|kind| draft.lines_of(kind))
            .map(|(index, line)| ReportLine {
                index,
                kind: line.kind,
                account: line.account.map(|id| {
                    catalog
                        .account_label(id)
                        .unwrap_or_else(|| format!("#{id}"))
                }),
                amount: format_amount(line.amount, scale),
            })
            .collect();

        Self {
            entry_date: draft.entry_date().map(|date| date.to_string()),
            description: draft.description().map(|id| {
                catalog
                    .description(id)
                    .map_or_else(|| format!("#{id}"), |d| d.label.clone())
            }),
            lines,
            total_debit: format_amount(balance.total_debit, scale),
            total_credit: format_amount(balance.total_credit, scale),
            balance: balance.indicator().describe(scale),
            errors: draft.validate(),
        }
    }

    /// True when the entry can be submitted.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Plain-text rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let unset = "(unset)".to_string();

        let _ = writeln!(out, "Date:        {}", self.entry_date.as_ref().unwrap_or(&unset));
        let _ = writeln!(out, "Description: {}", self.description.as_ref().unwrap_or(&unset));
        for line in &self.lines {
            let _ = writeln!(
                out,
                "  [{}] {:<6} {:<32} {:>14}",
                line.index,
                line.kind.as_str(),
                line.account.as_ref().unwrap_or(&unset),
                line.amount
            );
        }
        let _ = writeln!(
            out,
            "Totals:      debit {} / credit {} ({})",
            self.total_debit, self.total_credit, self.balance
        );

        if self.is_valid() {
            out.push_str("Entry is ready to submit\n");
        } else {
            out.push_str("Problems:\n");
            for (key, issue) in self.errors.iter() {
                let _ = writeln!(out, "  {key}: {issue}");
            }
        }
        out
    }
}

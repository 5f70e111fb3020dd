//! Property-based tests for draft mutation.
//!
//! - Line floor: removal never drops below two lines
//! - Amount coercion: arbitrary text never yields a negative amount
//! - Validation completeness: every problem is reported in one call

use chrono::NaiveDate;
use lancamento_shared::types::{AccountId, AmountInput, DescriptionId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::draft::{EntryDraft, MIN_LINES};
use super::types::{EntryKind, LineUpdate};
use super::validation::FieldKey;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// Strategy to generate an entry kind.
fn entry_kind_strategy() -> impl Strategy<Value = EntryKind> {
    prop_oneof![Just(EntryKind::Debit), Just(EntryKind::Credit)]
}

/// Strategy to generate a draft with `2..12` lines.
fn draft_strategy() -> impl Strategy<Value = EntryDraft> {
    prop::collection::vec(entry_kind_strategy(), 0..10).prop_map(|kinds| {
        let mut draft = EntryDraft::fresh(day());
        for kind in kinds {
            draft.add_line(kind);
        }
        draft
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any sequence of removals leaves at least two lines.
    #[test]
    fn prop_remove_never_breaks_floor(
        mut draft in draft_strategy(),
        removals in prop::collection::vec(0usize..16, 0..30),
    ) {
        for index in removals {
            let before = draft.line_items().len();
            let removed = draft.remove_line(index);
            let after = draft.line_items().len();

            prop_assert!(after >= MIN_LINES);
            if removed {
                prop_assert_eq!(after, before - 1);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    /// At exactly two lines, removal is a no-op for every index.
    #[test]
    fn prop_remove_at_floor_is_noop(index in 0usize..100) {
        let mut draft = EntryDraft::fresh(day());
        let before = draft.clone();
        prop_assert!(!draft.remove_line(index));
        prop_assert_eq!(draft, before);
    }

    /// Arbitrary amount text always coerces to a non-negative value, and
    /// applying the same update twice is stable.
    #[test]
    fn prop_amount_coercion_is_idempotent(text in ".{0,12}") {
        let mut draft = EntryDraft::fresh(day());
        draft.update_line(0, LineUpdate::Amount(AmountInput::from(text.as_str())));
        let first = draft.line_items()[0].amount;
        draft.update_line(0, LineUpdate::Amount(AmountInput::from(text.as_str())));

        prop_assert!(first >= Decimal::ZERO);
        prop_assert_eq!(draft.line_items()[0].amount, first);
    }

    /// Well-formed cent amounts survive the text round trip.
    #[test]
    fn prop_cent_amounts_parse_exactly(cents in 0i64..100_000_000i64) {
        let amount = Decimal::new(cents, 2);
        let mut draft = EntryDraft::fresh(day());
        draft.update_line(1, LineUpdate::Amount(AmountInput::from(amount.to_string())));
        prop_assert_eq!(draft.line_items()[1].amount, amount);
    }

    /// Missing date, description, one account, and an imbalance are all
    /// reported together.
    #[test]
    fn prop_validation_reports_all_problems(
        debit_cents in 1i64..1_000_000i64,
        gap_cents in 1i64..1_000i64,
        missing_account in 0usize..2,
    ) {
        let mut draft = EntryDraft::fresh(day());
        draft.set_date(None);
        draft.set_description(None);
        for index in 0..2 {
            if index != missing_account {
                draft.update_line(index, LineUpdate::Account(Some(AccountId::new(10 + index as i64))));
            }
        }
        draft.update_line(0, LineUpdate::Amount(Decimal::new(debit_cents, 2).into()));
        draft.update_line(1, LineUpdate::Amount(Decimal::new(debit_cents + gap_cents, 2).into()));

        let errors = draft.validate();
        prop_assert!(errors.contains(FieldKey::Date));
        prop_assert!(errors.contains(FieldKey::Description));
        prop_assert!(errors.contains(FieldKey::Lines));
        prop_assert!(errors.contains(FieldKey::LineAccount(missing_account)));
        prop_assert_eq!(errors.len(), 4);
    }

    /// A balanced, complete draft always produces a payload.
    #[test]
    fn prop_complete_balanced_draft_is_submittable(
        cents in prop::collection::vec(1i64..1_000_000i64, 1..6),
    ) {
        let mut draft = EntryDraft::fresh(day());
        draft.set_description(Some(DescriptionId::new(1)));

        let total: i64 = cents.iter().sum();
        draft.update_line(1, LineUpdate::Amount(Decimal::new(total, 2).into()));
        draft.update_line(1, LineUpdate::Account(Some(AccountId::new(99))));

        for (i, amount) in cents.iter().enumerate() {
            let index = if i == 0 { 0 } else { draft.add_line(EntryKind::Debit) };
            draft.update_line(index, LineUpdate::Amount(Decimal::new(*amount, 2).into()));
            draft.update_line(index, LineUpdate::Account(Some(AccountId::new(i as i64 + 1))));
        }

        let payload = draft.to_payload();
        prop_assert!(payload.is_ok(), "errors: {:?}", payload.err());
    }
}

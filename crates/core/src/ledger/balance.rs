//! Balance calculation over the lines of a draft.
//!
//! Called on every change to drive the live balance indicator and to gate
//! the submit control.

use lancamento_shared::types::format_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{EntryKind, LineItem};

/// Debit and credit totals of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResult {
    /// Sum of debit line amounts.
    pub total_debit: Decimal,
    /// Sum of credit line amounts.
    pub total_credit: Decimal,
    /// Debits equal credits and are greater than zero.
    pub is_balanced: bool,
    /// A total exceeded the `Decimal` range and was capped at `Decimal::MAX`.
    #[serde(default)]
    pub overflowed: bool,
}

impl BalanceResult {
    /// Creates a result from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit > Decimal::ZERO && total_debit == total_credit,
            overflowed: false,
        }
    }

    fn capped(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: false,
            overflowed: true,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }

    /// Returns the state shown by the live balance indicator.
    #[must_use]
    pub fn indicator(&self) -> BalanceIndicator {
        if self.overflowed {
            BalanceIndicator::OutOfRange
        } else if self.is_balanced {
            BalanceIndicator::Balanced
        } else {
            BalanceIndicator::Difference(self.difference().abs())
        }
    }
}

/// Live balance indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum BalanceIndicator {
    /// Debits equal credits.
    Balanced,
    /// Absolute gap between the two sides.
    Difference(Decimal),
    /// A total is too large to represent.
    OutOfRange,
}

impl BalanceIndicator {
    /// Human-readable label, amounts shown with `scale` decimal places.
    #[must_use]
    pub fn describe(&self, scale: u32) -> String {
        match self {
            Self::Balanced => "balanced".to_string(),
            Self::Difference(amount) => format!("difference of {}", format_amount(*amount, scale)),
            Self::OutOfRange => "totals out of range".to_string(),
        }
    }
}

/// Sums debit and credit amounts in a single pass.
///
/// Negative amounts cannot come out of the draft's mutation API; if one is
/// present anyway it contributes zero rather than skewing the totals.
///
/// A total that leaves the `Decimal` range is capped at `Decimal::MAX` and
/// the result is never balanced.
#[must_use]
pub fn compute_balance(lines: &[LineItem]) -> BalanceResult {
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut overflowed = false;

    for line in lines {
        let amount = line.amount.max(Decimal::ZERO);
        let total = match line.kind {
            EntryKind::Debit => &mut total_debit,
            EntryKind::Credit => &mut total_credit,
        };
        match total.checked_add(amount) {
            Some(sum) => *total = sum,
            None => {
                *total = Decimal::MAX;
                overflowed = true;
            }
        }
    }

    if overflowed {
        BalanceResult::capped(total_debit, total_credit)
    } else {
        BalanceResult::new(total_debit, total_credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lancamento_shared::types::AccountId;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn line(kind: EntryKind, amount: Decimal) -> LineItem {
        LineItem {
            account: Some(AccountId::new(1)),
            kind,
            amount,
        }
    }

    #[test]
    fn test_balanced_example() {
        let result = compute_balance(&[
            line(EntryKind::Debit, dec!(150.00)),
            line(EntryKind::Credit, dec!(150.00)),
        ]);
        assert_eq!(result.total_debit, dec!(150.00));
        assert_eq!(result.total_credit, dec!(150.00));
        assert!(result.is_balanced);
        assert_eq!(result.indicator(), BalanceIndicator::Balanced);
    }

    #[test]
    fn test_unbalanced_example() {
        let result = compute_balance(&[
            line(EntryKind::Debit, dec!(150.00)),
            line(EntryKind::Credit, dec!(149.99)),
        ]);
        assert!(!result.is_balanced);
        assert_eq!(result.difference(), dec!(0.01));
        assert_eq!(result.indicator().describe(2), "difference of 0.01");
    }

    #[test]
    fn test_all_zero_is_not_balanced() {
        let result = compute_balance(&[
            line(EntryKind::Debit, Decimal::ZERO),
            line(EntryKind::Credit, Decimal::ZERO),
        ]);
        assert_eq!(result.total_debit, result.total_credit);
        assert!(!result.is_balanced);
        assert_eq!(result.indicator().describe(2), "difference of 0.00");
    }

    #[test]
    fn test_credit_heavy_difference_is_absolute() {
        let result = compute_balance(&[
            line(EntryKind::Debit, dec!(10)),
            line(EntryKind::Credit, dec!(15)),
        ]);
        assert_eq!(result.difference(), dec!(-5));
        assert_eq!(result.indicator(), BalanceIndicator::Difference(dec!(5)));
    }

    #[test]
    fn test_negative_amount_contributes_zero() {
        let result = compute_balance(&[
            line(EntryKind::Debit, dec!(20)),
            line(EntryKind::Debit, dec!(-5)),
            line(EntryKind::Credit, dec!(20)),
        ]);
        assert_eq!(result.total_debit, dec!(20));
        assert!(result.is_balanced);
    }

    #[test]
    fn test_multi_line_split() {
        let result = compute_balance(&[
            line(EntryKind::Debit, dec!(100)),
            line(EntryKind::Credit, dec!(60)),
            line(EntryKind::Credit, dec!(40)),
        ]);
        assert!(result.is_balanced);
    }

    #[test]
    fn test_total_past_decimal_range_is_capped_and_unbalanced() {
        let result = compute_balance(&[
            line(EntryKind::Debit, Decimal::MAX),
            line(EntryKind::Debit, Decimal::MAX),
            line(EntryKind::Credit, Decimal::MAX),
        ]);
        assert!(result.overflowed);
        assert!(!result.is_balanced);
        assert_eq!(result.total_debit, Decimal::MAX);
        assert_eq!(result.total_credit, Decimal::MAX);
        assert_eq!(result.indicator(), BalanceIndicator::OutOfRange);
        assert_eq!(result.indicator().describe(2), "totals out of range");
    }

    #[test]
    fn test_indicator_serializes_tagged() {
        let json = serde_json::to_value(BalanceIndicator::Balanced).unwrap();
        assert_eq!(json["status"], "balanced");
    }

    fn line_strategy() -> impl Strategy<Value = LineItem> {
        (
            prop_oneof![Just(EntryKind::Debit), Just(EntryKind::Credit)],
            (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        )
            .prop_map(|(kind, amount)| line(kind, amount))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Totals do not depend on line order.
        #[test]
        fn prop_totals_are_order_independent(
            lines in prop::collection::vec(line_strategy(), 2..20),
            rotation in 0usize..20,
        ) {
            let original = compute_balance(&lines);

            let mut reversed = lines.clone();
            reversed.reverse();
            let mut rotated = lines.clone();
            let len = rotated.len();
            rotated.rotate_left(rotation % len);

            prop_assert_eq!(compute_balance(&reversed), original);
            prop_assert_eq!(compute_balance(&rotated), original);
        }

        /// Balanced implies a positive, equal total on both sides.
        #[test]
        fn prop_balanced_implies_positive_equal_totals(
            lines in prop::collection::vec(line_strategy(), 2..20),
        ) {
            let result = compute_balance(&lines);
            if result.is_balanced {
                prop_assert!(result.total_debit > Decimal::ZERO);
                prop_assert_eq!(result.difference(), Decimal::ZERO);
            }
        }

        /// Mirroring every line onto the other side always balances.
        #[test]
        fn prop_mirrored_lines_balance(
            amounts in prop::collection::vec((1i64..1_000_000i64).prop_map(|c| Decimal::new(c, 2)), 1..10),
        ) {
            let mut lines: Vec<LineItem> = amounts.iter().map(|a| line(EntryKind::Debit, *a)).collect();
            lines.extend(amounts.iter().map(|a| line(EntryKind::Credit, *a)));
            prop_assert!(compute_balance(&lines).is_balanced);
        }
    }
}

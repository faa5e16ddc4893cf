//! Property-based tests for transaction validation rules.

use ledgerbook_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::{Entry, EntryInput, EntryType};
use super::error::ValidationError;
use super::validation::{check_balance, check_entry_shape};

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a zero or negative amount.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn side_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

fn entries(values: &[Decimal]) -> Vec<Entry> {
    values
        .iter()
        .map(|value| Entry {
            account: AccountId::new(),
            value: *value,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Zero and negative values are rejected at their position.
    #[test]
    fn prop_non_positive_value_rejected(
        value in non_positive_amount(),
        side in side_strategy(),
        index in 0usize..10,
    ) {
        let entry = EntryInput { account: Some(AccountId::new()), value: Some(value) };
        prop_assert_eq!(
            check_entry_shape(&entry, side, index),
            Err(ValidationError::ValueNotPositive { side, index })
        );
    }

    /// Positive values with an account pass the shape rules.
    #[test]
    fn prop_positive_value_accepted(value in positive_amount(), side in side_strategy()) {
        let entry = EntryInput { account: Some(AccountId::new()), value: Some(value) };
        prop_assert_eq!(check_entry_shape(&entry, side, 0), Ok(()));
    }

    /// The balance rule accepts exactly the transactions whose sides sum equal.
    #[test]
    fn prop_balance_iff_sums_equal(
        debits in prop::collection::vec(positive_amount(), 1..6),
        credits in prop::collection::vec(positive_amount(), 1..6),
    ) {
        let debit_total: Decimal = debits.iter().copied().sum();
        let credit_total: Decimal = credits.iter().copied().sum();
        let result = check_balance(&entries(&debits), &entries(&credits));

        if debit_total == credit_total {
            prop_assert_eq!(result, Ok(()));
        } else {
            prop_assert_eq!(
                result,
                Err(ValidationError::Unbalanced { debits: debit_total, credits: credit_total })
            );
        }
    }

    /// Splitting one debit into several credits that add up to it always balances.
    #[test]
    fn prop_split_credits_balance(
        parts in prop::collection::vec(positive_amount(), 1..8),
    ) {
        let total: Decimal = parts.iter().copied().sum();
        prop_assert_eq!(check_balance(&entries(&[total]), &entries(&parts)), Ok(()));
    }

    /// Adding a positive amount to one side of a balanced transaction unbalances it.
    #[test]
    fn prop_extra_amount_unbalances(
        value in positive_amount(),
        extra in positive_amount(),
    ) {
        prop_assert!(check_balance(&entries(&[value + extra]), &entries(&[value])).is_err());
    }
}

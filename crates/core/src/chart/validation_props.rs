//! Property-based tests for account hierarchy rules.

use ledgerbook_shared::types::{AccountId, ChartId};
use proptest::prelude::*;

use super::types::{
    Account, AccountClassification, AccountInput, IncomeStatementAttribute, NewAccount,
    NormalBalance, StatementKind,
};
use super::validation::{check_definition, check_parent};
use crate::ledger::error::ValidationError;

fn statement_strategy() -> impl Strategy<Value = StatementKind> {
    prop_oneof![
        Just(StatementKind::BalanceSheet),
        Just(StatementKind::IncomeStatement)
    ]
}

fn normal_balance_strategy() -> impl Strategy<Value = NormalBalance> {
    prop_oneof![Just(NormalBalance::Debit), Just(NormalBalance::Credit)]
}

fn attribute_strategy() -> impl Strategy<Value = Option<IncomeStatementAttribute>> {
    prop::option::of(prop::sample::select(IncomeStatementAttribute::ALL.to_vec()))
}

fn classification_strategy() -> impl Strategy<Value = AccountClassification> {
    (statement_strategy(), normal_balance_strategy(), attribute_strategy()).prop_map(
        |(statement, normal_balance, attribute)| AccountClassification {
            statement,
            normal_balance,
            attribute,
        },
    )
}

fn number_strategy() -> impl Strategy<Value = String> {
    "[1-9][0-9]{0,3}"
}

fn parent(chart_id: ChartId, number: String, classification: AccountClassification) -> Account {
    Account::from_new(
        AccountId::new(),
        chart_id,
        NewAccount {
            number,
            name: "Parent".into(),
            classification,
            parent: None,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any child accepted under a parent extends its number and keeps its flags.
    #[test]
    fn prop_accepted_child_inherits(
        parent_number in number_strategy(),
        suffix in "[0-9]{0,3}",
        child_number in number_strategy(),
        use_suffix in any::<bool>(),
        parent_class in classification_strategy(),
        child_class in classification_strategy(),
    ) {
        let chart_id = ChartId::new();
        let p = parent(chart_id, parent_number.clone(), parent_class);
        let number = if use_suffix { format!("{parent_number}{suffix}") } else { child_number };
        let child = NewAccount {
            number,
            name: "Child".into(),
            classification: child_class,
            parent: Some(p.id),
        };

        if check_parent(&p, chart_id, &child).is_ok() {
            prop_assert!(child.number.starts_with(&p.number));
            for flag in p.inherited_flags() {
                prop_assert!(child.classification.has_flag(flag));
            }
        }
    }

    /// A child with the same classification and an extended number is always accepted.
    #[test]
    fn prop_identical_classification_accepted(
        parent_number in number_strategy(),
        suffix in "[0-9]{1,3}",
        class in classification_strategy(),
    ) {
        let chart_id = ChartId::new();
        let p = parent(chart_id, parent_number.clone(), class);
        let child = NewAccount {
            number: format!("{parent_number}{suffix}"),
            name: "Child".into(),
            classification: class,
            parent: Some(p.id),
        };
        prop_assert_eq!(check_parent(&p, chart_id, &child), Ok(()));
    }

    /// A parent in another chart is rejected regardless of number and flags.
    #[test]
    fn prop_foreign_parent_rejected(
        number in number_strategy(),
        class in classification_strategy(),
    ) {
        let p = parent(ChartId::new(), number.clone(), class);
        let child = NewAccount {
            number,
            name: "Child".into(),
            classification: class,
            parent: Some(p.id),
        };
        prop_assert_eq!(
            check_parent(&p, ChartId::new(), &child),
            Err(ValidationError::ParentInOtherChart)
        );
    }

    /// Setting two or more attributes always fails with the single-attribute rule.
    #[test]
    fn prop_multiple_attributes_rejected(
        picks in prop::sample::subsequence(IncomeStatementAttribute::ALL.to_vec(), 2..=6),
    ) {
        let input = AccountInput {
            number: Some("4".into()),
            name: Some("Expenses".into()),
            income_statement: Some(true),
            debit_balance: Some(true),
            operational: picks.contains(&IncomeStatementAttribute::Operational),
            deduction: picks.contains(&IncomeStatementAttribute::Deduction),
            sales_tax: picks.contains(&IncomeStatementAttribute::SalesTax),
            cost: picks.contains(&IncomeStatementAttribute::Cost),
            income_tax: picks.contains(&IncomeStatementAttribute::IncomeTax),
            dividends: picks.contains(&IncomeStatementAttribute::Dividends),
            ..AccountInput::default()
        };
        prop_assert_eq!(check_definition(&input), Err(ValidationError::MultipleAttributes));
    }
}

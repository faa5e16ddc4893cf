//! Ledger entry domain types.

use std::fmt;

use ledgerbook_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Type of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl EntryType {
    /// Both sides, debits first.
    pub const BOTH: [Self; 2] = [Self::Debit, Self::Credit];

    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => f.write_str("debit"),
            Self::Credit => f.write_str("credit"),
        }
    }
}

/// A single posted entry. The side is given by the list holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// The account affected by this entry.
    pub account: AccountId,
    /// Strictly positive amount.
    pub value: Decimal,
}

/// Entry as submitted by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    /// Target account.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub account: Option<AccountId>,
    /// Amount: a JSON number or a decimal string.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub value: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(EntryType::Debit.opposite(), EntryType::Credit);
        assert_eq!(EntryType::Credit.opposite(), EntryType::Debit);
    }

    #[test]
    fn test_entry_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EntryType::Credit).unwrap(), "\"credit\"");
        assert_eq!(EntryType::Debit.to_string(), "debit");
    }

    #[test]
    fn test_entry_input_accepts_numeric_and_string_values() {
        let input: EntryInput = serde_json::from_str(r#"{"value": 12.5}"#).unwrap();
        assert_eq!(input.value, Some(Decimal::new(125, 1)));
        assert!(input.account.is_none());

        let input: EntryInput = serde_json::from_str(r#"{"value": "0.10"}"#).unwrap();
        assert_eq!(input.value, Some(Decimal::new(10, 2)));
    }
}

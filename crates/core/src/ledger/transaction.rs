//! Transaction aggregate.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use ledgerbook_shared::types::{AccountId, ChartId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryInput, EntryType};
use crate::lenient;

/// A posted double-entry transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Chart of accounts this transaction belongs to.
    pub chart_id: ChartId,
    /// Business date.
    pub date: DateTime<Utc>,
    /// Description.
    pub memo: String,
    /// When the transaction was posted. Breaks ties between equal dates.
    pub timestamp: DateTime<Utc>,
    /// Debit entries, in submission order.
    pub debits: Vec<Entry>,
    /// Credit entries, in submission order.
    pub credits: Vec<Entry>,
}

impl Transaction {
    /// Builds a stored transaction from a validated one.
    #[must_use]
    pub fn from_new(id: TransactionId, chart_id: ChartId, new: NewTransaction) -> Self {
        Self {
            id,
            chart_id,
            date: new.date,
            memo: new.memo,
            timestamp: new.timestamp,
            debits: new.debits,
            credits: new.credits,
        }
    }

    /// Entries on one side.
    #[must_use]
    pub fn entries(&self, side: EntryType) -> &[Entry] {
        match side {
            EntryType::Debit => &self.debits,
            EntryType::Credit => &self.credits,
        }
    }

    /// Returns true if any entry, on either side, targets the account.
    #[must_use]
    pub fn touches(&self, account: AccountId) -> bool {
        self.debits
            .iter()
            .chain(&self.credits)
            .any(|e| e.account == account)
    }

    /// Sum of the values on one side.
    #[must_use]
    pub fn total(&self, side: EntryType) -> Decimal {
        self.entries(side).iter().map(|e| e.value).sum()
    }

    /// Key the log is ordered by.
    #[must_use]
    pub fn sort_key(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.date, self.timestamp)
    }
}

/// A validated transaction, ready to be appended to a chart's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Business date.
    pub date: DateTime<Utc>,
    /// Description.
    pub memo: String,
    /// Posting time.
    pub timestamp: DateTime<Utc>,
    /// Debit entries.
    pub debits: Vec<Entry>,
    /// Credit entries.
    pub credits: Vec<Entry>,
}

/// Transaction as submitted by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    /// RFC 3339 instant or `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub date: Option<String>,
    /// Description.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub memo: Option<String>,
    /// Debit entries.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub debits: Option<Vec<EntryInput>>,
    /// Credit entries.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub credits: Option<Vec<EntryInput>>,
}

impl TransactionInput {
    /// Submitted entries on one side, empty when absent.
    #[must_use]
    pub fn entries(&self, side: EntryType) -> &[EntryInput] {
        let entries = match side {
            EntryType::Debit => &self.debits,
            EntryType::Credit => &self.credits,
        };
        entries.as_deref().unwrap_or_default()
    }
}

/// Parses a business date: an RFC 3339 instant, or a calendar date taken as midnight UTC.
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    #[case("2024-03-01", Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()))]
    #[case("2024-03-01T10:30:00Z", Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()))]
    #[case("2024-03-01T10:30:00+02:00", Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()))]
    #[case("  2024-03-01 ", Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()))]
    #[case("01/03/2024", None)]
    #[case("2024-02-30", None)]
    #[case("", None)]
    fn test_parse_date(#[case] raw: &str, #[case] expected: Option<DateTime<Utc>>) {
        assert_eq!(parse_date(raw), expected);
    }

    #[test]
    fn test_touches_and_totals() {
        let cash = AccountId::new();
        let sales = AccountId::new();
        let tax = AccountId::new();
        let now = Utc::now();
        let tx = Transaction::from_new(
            TransactionId::new(),
            ChartId::new(),
            NewTransaction {
                date: now,
                memo: "Sale".into(),
                timestamp: now,
                debits: vec![Entry {
                    account: cash,
                    value: dec!(110),
                }],
                credits: vec![
                    Entry {
                        account: sales,
                        value: dec!(100),
                    },
                    Entry {
                        account: tax,
                        value: dec!(10),
                    },
                ],
            },
        );

        assert!(tx.touches(cash));
        assert!(tx.touches(tax));
        assert!(!tx.touches(AccountId::new()));
        assert_eq!(tx.total(EntryType::Debit), dec!(110));
        assert_eq!(tx.total(EntryType::Credit), dec!(110));
        assert_eq!(tx.entries(EntryType::Credit).len(), 2);
    }

    #[test]
    fn test_input_entries_default_to_empty() {
        let input: TransactionInput = serde_json::from_str(r#"{"memo": "x"}"#).unwrap();
        assert!(input.entries(EntryType::Debit).is_empty());
        assert!(input.entries(EntryType::Credit).is_empty());
    }
}

//! Chart of accounts domain types.
//!
//! Callers submit loosely-typed definitions ([`ChartInput`], [`AccountInput`])
//! whose flags mirror the wire format. Validation turns them into the typed
//! model ([`NewChart`], [`NewAccount`]) where each classification axis is a
//! closed enum, so "exactly one of two" cannot be violated once stored.

use std::fmt;

use chrono::{DateTime, Utc};
use ledgerbook_shared::types::{AccountId, ChartId};
use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient;

/// Financial statement an account reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatementKind {
    /// Balance sheet (assets, liabilities, equity).
    BalanceSheet,
    /// Income statement (revenue, expenses).
    IncomeStatement,
}

/// Side on which an account's balance grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Balance increases with debits.
    Debit,
    /// Balance increases with credits.
    Credit,
}

/// Optional income statement attribute. An account carries at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncomeStatementAttribute {
    /// Operating revenue or expense.
    Operational,
    /// Deduction from gross revenue.
    Deduction,
    /// Sales tax.
    SalesTax,
    /// Cost of goods or services sold.
    Cost,
    /// Income tax.
    IncomeTax,
    /// Dividends.
    Dividends,
}

impl IncomeStatementAttribute {
    /// All attributes in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Operational,
        Self::Deduction,
        Self::SalesTax,
        Self::Cost,
        Self::IncomeTax,
        Self::Dividends,
    ];
}

/// Group a flag belongs to, used when reporting inheritance violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    /// Balance sheet vs income statement.
    FinancialStatement,
    /// One of the six income statement attributes.
    IncomeStatementAttribute,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FinancialStatement => f.write_str("financial statement"),
            Self::IncomeStatementAttribute => f.write_str("income statement attribute"),
        }
    }
}

/// A flag a child account must keep when its parent has it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InheritableFlag {
    /// `balanceSheet`
    BalanceSheet,
    /// `incomeStatement`
    IncomeStatement,
    /// `operational`
    Operational,
    /// `deduction`
    Deduction,
    /// `salesTax`
    SalesTax,
    /// `cost`
    Cost,
    /// `incomeTax`
    IncomeTax,
    /// `dividends`
    Dividends,
}

impl InheritableFlag {
    /// All flags, in the order inheritance is checked.
    pub const ALL: [Self; 8] = [
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::Operational,
        Self::Deduction,
        Self::SalesTax,
        Self::Cost,
        Self::IncomeTax,
        Self::Dividends,
    ];

    /// Returns the classification group of this flag.
    #[must_use]
    pub const fn classification(self) -> Classification {
        match self {
            Self::BalanceSheet | Self::IncomeStatement => Classification::FinancialStatement,
            _ => Classification::IncomeStatementAttribute,
        }
    }

    /// Returns the wire name of the flag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balanceSheet",
            Self::IncomeStatement => "incomeStatement",
            Self::Operational => "operational",
            Self::Deduction => "deduction",
            Self::SalesTax => "salesTax",
            Self::Cost => "cost",
            Self::IncomeTax => "incomeTax",
            Self::Dividends => "dividends",
        }
    }
}

impl fmt::Display for InheritableFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StatementKind> for InheritableFlag {
    fn from(kind: StatementKind) -> Self {
        match kind {
            StatementKind::BalanceSheet => Self::BalanceSheet,
            StatementKind::IncomeStatement => Self::IncomeStatement,
        }
    }
}

impl From<IncomeStatementAttribute> for InheritableFlag {
    fn from(attribute: IncomeStatementAttribute) -> Self {
        match attribute {
            IncomeStatementAttribute::Operational => Self::Operational,
            IncomeStatementAttribute::Deduction => Self::Deduction,
            IncomeStatementAttribute::SalesTax => Self::SalesTax,
            IncomeStatementAttribute::Cost => Self::Cost,
            IncomeStatementAttribute::IncomeTax => Self::IncomeTax,
            IncomeStatementAttribute::Dividends => Self::Dividends,
        }
    }
}

/// Typed classification of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountClassification {
    /// Statement the account reports on.
    pub statement: StatementKind,
    /// Normal balance side.
    pub normal_balance: NormalBalance,
    /// Income statement attribute, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<IncomeStatementAttribute>,
}

impl AccountClassification {
    /// Returns true if the classification carries the given inheritable flag.
    #[must_use]
    pub fn has_flag(&self, flag: InheritableFlag) -> bool {
        InheritableFlag::from(self.statement) == flag
            || self.attribute.is_some_and(|a| InheritableFlag::from(a) == flag)
    }

    /// Inheritable flags carried by this classification, in check order.
    pub fn flags(&self) -> impl Iterator<Item = InheritableFlag> + '_ {
        InheritableFlag::ALL
            .into_iter()
            .filter(move |flag| self.has_flag(*flag))
    }
}

/// Position of an account in the hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyStatus {
    /// Leaf account; the only kind that can receive entries.
    #[default]
    Analytic,
    /// Aggregate account with at least one child.
    Synthetic,
}

/// An account embedded in a chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identity.
    pub id: AccountId,
    /// Owning chart of accounts.
    pub chart_id: ChartId,
    /// Hierarchical account number (prefix of every descendant's number).
    pub number: String,
    /// Display name.
    pub name: String,
    /// Statement, normal balance and attribute.
    pub classification: AccountClassification,
    /// Parent account, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<AccountId>,
    /// Analytic or synthetic.
    pub status: HierarchyStatus,
}

impl Account {
    /// Builds a stored account from a validated definition. New accounts are analytic.
    #[must_use]
    pub fn from_new(id: AccountId, chart_id: ChartId, new: NewAccount) -> Self {
        Self {
            id,
            chart_id,
            number: new.number,
            name: new.name,
            classification: new.classification,
            parent: new.parent,
            status: HierarchyStatus::Analytic,
        }
    }

    /// Returns the account's normal balance side.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        self.classification.normal_balance
    }

    /// Returns true if the account has no children.
    #[must_use]
    pub fn is_analytic(&self) -> bool {
        self.status == HierarchyStatus::Analytic
    }

    /// Returns true if the account has at least one child.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.status == HierarchyStatus::Synthetic
    }

    /// Marks the account as an aggregate of its children.
    pub fn mark_synthetic(&mut self) {
        self.status = HierarchyStatus::Synthetic;
    }

    /// Returns true if the account carries the flag.
    #[must_use]
    pub fn has_flag(&self, flag: InheritableFlag) -> bool {
        self.classification.has_flag(flag)
    }

    /// Flags any child of this account must also carry.
    pub fn inherited_flags(&self) -> impl Iterator<Item = InheritableFlag> + '_ {
        self.classification.flags()
    }
}

/// A chart of accounts with its embedded accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOfAccounts {
    /// Chart identity.
    pub id: ChartId,
    /// Chart name.
    pub name: String,
    /// Account designated as retained earnings, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retained_earnings_account: Option<AccountId>,
    /// Accounts in insertion order.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// When the chart was created.
    pub created_at: DateTime<Utc>,
}

impl ChartOfAccounts {
    /// Builds a stored chart from a validated definition.
    #[must_use]
    pub fn from_new(id: ChartId, new: NewChart) -> Self {
        Self {
            id,
            name: new.name,
            retained_earnings_account: None,
            accounts: Vec::new(),
            created_at: new.created_at,
        }
    }
}

/// Chart definition as submitted by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInput {
    /// Chart name.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub name: Option<String>,
}

/// A validated chart definition, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChart {
    /// Chart name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Account definition as submitted by a caller.
///
/// Flags are optional booleans so that "not given" can be told apart from
/// `false`, which the validator needs for its two-stage statement and
/// normal-balance checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInput {
    /// Account number. Numeric JSON values are accepted and kept as text.
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: Option<String>,
    /// Account name.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub name: Option<String>,
    /// Reports on the balance sheet.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub balance_sheet: Option<bool>,
    /// Reports on the income statement.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub income_statement: Option<bool>,
    /// Debit-normal.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub debit_balance: Option<bool>,
    /// Credit-normal.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub credit_balance: Option<bool>,
    /// Operational attribute.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub operational: bool,
    /// Deduction attribute.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub deduction: bool,
    /// Sales tax attribute.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub sales_tax: bool,
    /// Cost attribute.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub cost: bool,
    /// Income tax attribute.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub income_tax: bool,
    /// Dividends attribute.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub dividends: bool,
    /// Parent account.
    #[serde(default)]
    pub parent: Option<AccountId>,
    /// Transient: designate (or undesignate) as the chart's retained earnings account.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub retained_earnings: Option<bool>,
}

impl AccountInput {
    /// Returns the attribute flags that are set, in declaration order.
    #[must_use]
    pub fn attributes(&self) -> Vec<IncomeStatementAttribute> {
        IncomeStatementAttribute::ALL
            .into_iter()
            .filter(|attribute| self.attribute(*attribute))
            .collect()
    }

    fn attribute(&self, attribute: IncomeStatementAttribute) -> bool {
        match attribute {
            IncomeStatementAttribute::Operational => self.operational,
            IncomeStatementAttribute::Deduction => self.deduction,
            IncomeStatementAttribute::SalesTax => self.sales_tax,
            IncomeStatementAttribute::Cost => self.cost,
            IncomeStatementAttribute::IncomeTax => self.income_tax,
            IncomeStatementAttribute::Dividends => self.dividends,
        }
    }
}

/// A validated account definition, ready to be attached to a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Account number.
    pub number: String,
    /// Account name.
    pub name: String,
    /// Typed classification.
    pub classification: AccountClassification,
    /// Parent account.
    pub parent: Option<AccountId>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(u64),
    }

    Ok(lenient::optional::<D, Raw>(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Integer(n) => n.to_string(),
    }))
}

//! Hierarchy operations on a chart of accounts.
//!
//! A chart owns its accounts. Attaching a child flips the parent from
//! analytic to synthetic in the same mutation, so a store that applies
//! [`ChartOfAccounts::attach`] under one write lock never exposes a parent
//! with children that still reads as analytic.

use ledgerbook_shared::types::AccountId;

use super::types::{Account, ChartOfAccounts};

impl ChartOfAccounts {
    /// Looks up an account of this chart by identity.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Looks up an account of this chart by number.
    #[must_use]
    pub fn account_by_number(&self, number: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number == number)
    }

    /// Direct children of an account, in insertion order.
    pub fn children(&self, parent: AccountId) -> impl Iterator<Item = &Account> + '_ {
        self.accounts
            .iter()
            .filter(move |a| a.parent == Some(parent))
    }

    /// Accounts without a parent, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts.iter().filter(|a| a.parent.is_none())
    }

    /// Appends an account and marks its parent synthetic.
    ///
    /// # Errors
    ///
    /// Returns the parent's id if the account names a parent that is not in
    /// this chart. The chart is left untouched in that case.
    pub fn attach(&mut self, account: Account) -> Result<&Account, AccountId> {
        if let Some(parent_id) = account.parent {
            let parent = self
                .accounts
                .iter_mut()
                .find(|a| a.id == parent_id)
                .ok_or(parent_id)?;
            parent.mark_synthetic();
        }
        self.accounts.push(account);
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    /// Replaces a stored account, keeping its position. Returns false if absent.
    pub fn replace(&mut self, account: Account) -> bool {
        match self.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(slot) => {
                *slot = account;
                true
            }
            None => false,
        }
    }
}

/// Looks up an account across several charts.
#[must_use]
pub fn find_account(charts: &[ChartOfAccounts], id: AccountId) -> Option<&Account> {
    charts.iter().find_map(|chart| chart.account(id))
}
